//! Shared types for the skyline runtime.
//!
//! # Invariants
//! - Scene objects are owned by the rendering layer; handles here never
//!   control their lifetime.
//! - Buildings are immutable once generated.

mod building;
mod scene;
mod types;

pub use building::Building;
pub use scene::{SceneNode, SceneObject, SharedObject, shared};
pub use types::{EntityId, wrap_angle};
