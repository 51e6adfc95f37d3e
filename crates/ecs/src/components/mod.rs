//! Concrete component variants.

mod animation;
mod controller;
mod jump;
mod movement;
mod physics;
mod position;
mod rotation;

pub use animation::{AnimationState, AnimationTuning, LimbPose, Limbs, WalkingAnimationComponent};
pub use controller::{AnimationController, AnimationMixer};
pub use jump::{JumpComponent, JumpOutcome};
pub use movement::MovementComponent;
pub use physics::PhysicsComponent;
pub use position::PositionComponent;
pub use rotation::RotationComponent;
