//! Kernel: system scheduling, the frame loop and session assembly.
//!
//! # Invariants
//! - Every frame runs pre-update, entity updates, post-update, in that order.
//! - Systems run in registration order within a phase: input before physics.
//! - Host events only touch the input system between frames.

mod clock;
mod config;
mod error;
mod player;
mod system;
pub mod world;

pub use clock::{FrameClock, FrameTimer};
pub use config::{ConfigError, SkylineConfig};
pub use error::KernelError;
pub use player::{PlayerConfig, spawn_player};
pub use system::{System, SystemManager};
pub use world::World;
