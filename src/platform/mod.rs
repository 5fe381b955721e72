//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input events (window backends, scripted playback)
//! - Frame timing (wall clock with FPS cap, fixed step for headless runs)

pub mod input;
pub mod time;

pub use input::{InputEvent, InputSource, ScriptedInput};
pub use time::{Clock, FixedClock, RealtimeClock};
