//! Physics: gravity, drag, velocity integration and collision against static
//! buildings for every entity that carries a physics component.
//!
//! # Invariants
//! - Physics is opt-in: entities without a physics component or a visual
//!   object are skipped, never an error.
//! - Acceleration never survives a step.
//! - The building list is read-only to this crate.

mod aabb;
mod config;
mod system;

pub use aabb::{Aabb, Axis, push_out_of_footprint};
pub use config::{GroundPolicy, PhysicsConfig};
pub use system::PhysicsSystem;
