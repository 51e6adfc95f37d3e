use serde::{Deserialize, Serialize};
use skyline_common::wrap_angle;

use crate::entity::Entity;

/// Remaining yaw difference below which the rotation snaps to its target.
pub const SNAP_THRESHOLD: f32 = 0.01;

/// Current and desired yaw. The current yaw eases toward the target along
/// the shorter arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationComponent {
    current: f32,
    target: f32,
    pub angular_speed: f32,
}

impl RotationComponent {
    /// Facing `initial_yaw`, easing toward targets at `angular_speed`.
    pub fn new(initial_yaw: f32, angular_speed: f32) -> Self {
        Self {
            current: initial_yaw,
            target: initial_yaw,
            angular_speed,
        }
    }

    /// Current yaw in radians.
    pub fn rotation(&self) -> f32 {
        self.current
    }

    /// Yaw being eased toward.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Ease toward `yaw` over the next updates.
    pub fn set_target_rotation(&mut self, yaw: f32) {
        self.target = yaw;
    }

    /// Jump to `yaw` and stop any pending eased turn.
    pub fn set_current(&mut self, yaw: f32) {
        self.current = yaw;
        self.target = yaw;
    }

    /// Signed shortest-path difference still to cover, in `(-PI, PI]`.
    pub fn remaining(&self) -> f32 {
        wrap_angle(self.target - self.current)
    }

    /// Turn immediately by `delta`, carrying any pending eased turn along.
    pub fn rotate_by(&mut self, delta: f32) {
        self.current += delta;
        self.target += delta;
    }

    pub(crate) fn on_add(&mut self, entity: &mut Entity) {
        if let Some(object) = entity.object() {
            object.borrow_mut().set_yaw(self.current);
        }
    }

    pub(crate) fn update(&mut self, dt: f32, entity: &mut Entity) {
        let Some(object) = entity.object() else {
            return;
        };
        self.step(dt);
        object.borrow_mut().set_yaw(self.current);
    }

    fn step(&mut self, dt: f32) {
        let diff = self.remaining();
        if diff.abs() > SNAP_THRESHOLD {
            self.current += diff * (self.angular_speed * dt).min(1.0);
        } else {
            self.current = self.target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use skyline_common::{SceneNode, shared};
    use std::f32::consts::PI;

    #[test]
    fn eases_along_shorter_arc() {
        let mut rot = RotationComponent::new(0.0, 2.0);
        rot.set_target_rotation(3.0 * PI / 2.0);
        assert!((rot.remaining() + PI / 2.0).abs() < 1e-5);

        rot.step(0.1);
        assert!(rot.rotation() < 0.0, "moved the long way: {}", rot.rotation());
        assert!((rot.rotation() + PI / 2.0 * 0.2).abs() < 1e-5);
    }

    #[test]
    fn snaps_when_close() {
        let mut rot = RotationComponent::new(1.0, 2.0);
        rot.set_target_rotation(1.005);
        rot.step(0.016);
        assert_eq!(rot.rotation(), 1.005);
    }

    #[test]
    fn converges_on_target() {
        let mut rot = RotationComponent::new(0.0, 4.0);
        rot.set_target_rotation(PI / 2.0);
        for _ in 0..600 {
            rot.step(1.0 / 60.0);
        }
        assert_eq!(rot.rotation(), PI / 2.0);
    }

    #[test]
    fn rotate_by_preserves_pending_turn() {
        let mut rot = RotationComponent::new(0.0, 2.0);
        rot.set_target_rotation(PI);
        rot.rotate_by(0.5);
        assert_eq!(rot.rotation(), 0.5);
        assert!((rot.remaining() - PI).abs() < 1e-5);
    }

    #[test]
    fn set_current_cancels_pending_turn() {
        let mut rot = RotationComponent::new(0.0, 2.0);
        rot.set_target_rotation(2.0);
        rot.set_current(-1.0);
        assert_eq!(rot.remaining(), 0.0);
        rot.step(0.5);
        assert_eq!(rot.rotation(), -1.0);
    }

    #[test]
    fn update_writes_visual_yaw() {
        let node = shared(SceneNode::at(Vec3::ZERO));
        let mut entity = Entity::with_object("e", node.clone());
        let mut rot = RotationComponent::new(0.0, 2.0);
        rot.set_target_rotation(1.0);
        rot.update(0.1, &mut entity);
        assert_eq!(node.borrow().yaw(), rot.rotation());
    }
}
