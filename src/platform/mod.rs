//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks (`clock`, all targets)
//! - DOM screens, animation frames and inline config (`web`, wasm only)

pub mod clock;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::{FrameClock, needs_frame};
