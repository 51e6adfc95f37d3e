use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::EcsError;

/// Kinematic state of an entity, integrated by the physics system.
///
/// `acceleration` is frame-local: the physics system folds it into
/// `velocity` and clears it every step. `velocity` persists across frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsComponent {
    pub mass: f32,
    pub use_gravity: bool,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub is_grounded: bool,
    /// Height of the surface the entity last stood on.
    pub ground_y: f32,
    /// Horizontal radius of the capsule-like collider.
    pub collider_radius: f32,
    pub collider_height: f32,
    /// Distance from the entity origin down to its feet.
    pub bottom_offset: f32,
    /// Fraction of horizontal velocity lost per second in the air and on the ground.
    pub drag: f32,
    /// Horizontal velocity multiplier applied on every grounded step.
    pub friction: f32,
}

impl Default for PhysicsComponent {
    fn default() -> Self {
        Self {
            mass: 1.0,
            use_gravity: true,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            is_grounded: false,
            ground_y: 0.0,
            collider_radius: 0.5,
            collider_height: 2.0,
            bottom_offset: 1.0,
            drag: 0.1,
            friction: 0.9,
        }
    }
}

impl PhysicsComponent {
    /// Default body with the given mass and gravity flag.
    pub fn new(mass: f32, use_gravity: bool) -> Self {
        Self {
            mass,
            use_gravity,
            ..Self::default()
        }
    }

    /// Check the collider and damping invariants.
    pub fn validate(&self) -> Result<(), EcsError> {
        if self.collider_radius.is_nan() || self.collider_radius <= 0.0 {
            return Err(EcsError::InvalidPhysics {
                field: "collider_radius",
                value: self.collider_radius,
            });
        }
        if !(0.0..1.0).contains(&self.drag) {
            return Err(EcsError::InvalidPhysics {
                field: "drag",
                value: self.drag,
            });
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(EcsError::InvalidPhysics {
                field: "friction",
                value: self.friction,
            });
        }
        if self.mass.is_nan() || self.mass <= 0.0 {
            return Err(EcsError::InvalidPhysics {
                field: "mass",
                value: self.mass,
            });
        }
        Ok(())
    }

    /// Instant velocity change (jumps, knockback).
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse;
    }

    /// Queue a force for the next physics step: `a += F / m`.
    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force / self.mass;
    }

    /// Zero velocity and pending acceleration.
    pub fn stop(&mut self) {
        self.velocity = Vec3::ZERO;
        self.acceleration = Vec3::ZERO;
    }

    /// Speed in the XZ plane.
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(PhysicsComponent::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        let bad_radius = PhysicsComponent {
            collider_radius: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            bad_radius.validate(),
            Err(EcsError::InvalidPhysics { field: "collider_radius", .. })
        ));

        let bad_drag = PhysicsComponent {
            drag: 1.0,
            ..Default::default()
        };
        assert!(bad_drag.validate().is_err());

        let bad_friction = PhysicsComponent {
            friction: 1.5,
            ..Default::default()
        };
        assert!(bad_friction.validate().is_err());
    }

    #[test]
    fn force_is_mass_scaled() {
        let mut p = PhysicsComponent::new(2.0, true);
        p.apply_force(Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(p.acceleration, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(p.velocity, Vec3::ZERO);
    }

    #[test]
    fn impulse_changes_velocity_and_stop_clears() {
        let mut p = PhysicsComponent::default();
        p.apply_impulse(Vec3::new(0.0, 7.0, 0.0));
        p.apply_force(Vec3::X);
        assert_eq!(p.velocity.y, 7.0);
        p.stop();
        assert_eq!(p.velocity, Vec3::ZERO);
        assert_eq!(p.acceleration, Vec3::ZERO);
    }
}
