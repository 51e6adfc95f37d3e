//! Input: key and mouse state captured from host events, queried by the frame loop.
//!
//! # Invariants
//! - Host events only set flags; game logic reads them during the frame.
//! - Edge queries ("just pressed") observe exactly one frame window.
//! - Keys are normalised to lowercase at the single entry point.

pub mod action;
mod system;

pub use action::{Action, ActionMap};
pub use system::{InputSystem, MouseButton};
