use glam::Vec3;
use serde::{Deserialize, Serialize};
use skyline_input::Action;
use std::f32::consts::PI;

use crate::entity::{Entity, UpdateContext};

/// Tank-style controls.
///
/// Turning is immediate and continuous while held. Forward and backward
/// both walk along the current facing; the backward key additionally queues
/// an eased half turn on the rotation component when first pressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementComponent {
    /// Walking speed, units per second.
    pub speed: f32,
    /// Turning rate while a turn key is held, radians per second.
    pub turn_speed: f32,
}

impl Default for MovementComponent {
    fn default() -> Self {
        Self {
            speed: 2.0,
            turn_speed: 2.5,
        }
    }
}

impl MovementComponent {
    /// Tank controls moving at `speed` m/s and turning at `turn_speed` rad/s.
    pub fn new(speed: f32, turn_speed: f32) -> Self {
        Self { speed, turn_speed }
    }

    /// Whether a walking key is held this frame.
    pub fn is_walking(ctx: &UpdateContext<'_>) -> bool {
        ctx.input.is_some_and(|input| {
            input.is_pressed(Action::MoveForward) || input.is_pressed(Action::MoveBackward)
        })
    }

    pub(crate) fn update(&mut self, dt: f32, entity: &mut Entity, ctx: &UpdateContext<'_>) {
        let Some(input) = ctx.input else {
            return;
        };
        let Some(object) = entity.object().cloned() else {
            return;
        };

        let mut yaw = match entity.rotation() {
            Some(rotation) => rotation.rotation(),
            None => object.borrow().yaw(),
        };

        let mut turn = 0.0;
        if input.is_pressed(Action::TurnLeft) {
            turn += self.turn_speed * dt;
        }
        if input.is_pressed(Action::TurnRight) {
            turn -= self.turn_speed * dt;
        }
        if turn != 0.0 {
            yaw += turn;
            if let Some(rotation) = entity.rotation_mut() {
                rotation.rotate_by(turn);
            }
            object.borrow_mut().set_yaw(yaw);
        }

        if input.just_pressed(Action::MoveBackward) {
            if let Some(rotation) = entity.rotation_mut() {
                let flipped = rotation.target() + PI;
                rotation.set_target_rotation(flipped);
                tracing::trace!(entity = entity.name(), "reversing");
            }
        }

        if Self::is_walking(ctx) {
            let distance = self.speed * dt;
            let step = Vec3::new(yaw.sin() * distance, 0.0, yaw.cos() * distance);
            let position = object.borrow().position() + step;
            object.borrow_mut().set_position(position);
            entity.sync_position(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{PositionComponent, RotationComponent};
    use skyline_common::{SceneNode, shared};
    use skyline_input::InputSystem;

    fn walker() -> Entity {
        let mut e = Entity::with_object("Player", shared(SceneNode::default()));
        e.add_component(PositionComponent::new(0.0, 0.0, 0.0));
        e.add_component(MovementComponent::new(2.0, 2.5));
        e.add_component(RotationComponent::new(0.0, 4.0));
        e
    }

    fn frame(input: &mut InputSystem, e: &mut Entity, dt: f32) {
        input.pre_update();
        e.update(dt, &UpdateContext::new(input));
    }

    #[test]
    fn no_input_is_a_no_op() {
        let mut e = walker();
        e.update(1.0, &UpdateContext::detached());
        assert_eq!(e.position(), Some(Vec3::ZERO));
    }

    #[test]
    fn forward_walks_along_facing() {
        let mut e = walker();
        let mut input = InputSystem::new();
        input.key_down("w");
        frame(&mut input, &mut e, 0.5);
        let p = e.position().unwrap();
        assert!((p - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert_eq!(e.position_component().unwrap().get(), p);
    }

    #[test]
    fn turning_is_immediate() {
        let mut e = walker();
        let mut input = InputSystem::new();
        input.key_down("a");
        frame(&mut input, &mut e, 0.2);
        assert!((e.rotation().unwrap().rotation() - 0.5).abs() < 1e-5);
        assert!((e.yaw().unwrap() - 0.5).abs() < 1e-5);

        input.key_up("a");
        input.key_down("d");
        frame(&mut input, &mut e, 0.2);
        assert!(e.rotation().unwrap().rotation().abs() < 1e-5);
    }

    #[test]
    fn backward_flips_target_once() {
        let mut e = walker();
        let mut input = InputSystem::new();
        input.key_down("s");
        frame(&mut input, &mut e, 0.0);
        assert!((e.rotation().unwrap().target() - PI).abs() < 1e-5);

        // Still held: no second flip.
        frame(&mut input, &mut e, 0.0);
        assert!((e.rotation().unwrap().target() - PI).abs() < 1e-5);
    }

    #[test]
    fn backward_eventually_walks_the_other_way() {
        let mut e = walker();
        let mut input = InputSystem::new();
        input.key_down("s");
        for _ in 0..240 {
            frame(&mut input, &mut e, 1.0 / 60.0);
        }
        let before = e.position().unwrap();
        frame(&mut input, &mut e, 0.5);
        let after = e.position().unwrap();
        assert!(after.z < before.z);
    }
}
