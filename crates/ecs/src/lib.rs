//! Entity-component model for the avatar runtime.
//!
//! An [`Entity`] owns its components in insertion order, one per
//! [`ComponentKind`]. Components are a closed set of variants; each variant
//! implements only the lifecycle hooks it needs and the rest are no-ops.
//!
//! # Invariants
//! - A component is only reachable through its owning entity.
//! - Component updates run in insertion order, once per frame, only for
//!   active entities.
//! - The visual object is never created or destroyed here.

mod component;
pub mod components;
mod entity;
mod error;

pub use component::{Component, ComponentKind};
pub use components::{
    AnimationController, AnimationMixer, AnimationState, AnimationTuning, JumpComponent,
    JumpOutcome, LimbPose, Limbs, MovementComponent, PhysicsComponent, PositionComponent,
    RotationComponent, WalkingAnimationComponent,
};
pub use entity::{Entity, UpdateContext};
pub use error::EcsError;
