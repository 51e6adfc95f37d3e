//! Developer tooling: read-only inspection of a running world.
//!
//! # Invariants
//! - Inspection never mutates the world.

mod inspector;

pub use inspector::{EntityInfo, WorldInspector, WorldSummary};
