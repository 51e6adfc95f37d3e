//! World generation: the tiled ground plane and the buildings placed on it.
//!
//! # Invariants
//! - The same seed and config always produce the same layout.
//! - The tiles on the `i == 0` and `j == 0` axes never carry a building, so
//!   the spawn corridor stays clear.
//! - Building bases sit exactly on the ground surface.

mod config;
mod layout;
mod rng;

pub use config::{LayoutError, MAX_SIDE, WorldConfig};
pub use layout::{CityLayout, Lot, Tile};
pub use rng::SplitMix64;
