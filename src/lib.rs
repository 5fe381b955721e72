//! Heart Guard - defend the heart from pixels converging from the border
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pixels, spawning, collisions, scoring)
//! - `game`: Session entry point and frame loop driving the collaborators
//! - `renderer`: Backend-agnostic draw calls and frame layout
//! - `platform`: Input events and frame clocks
//! - `audio`: Sound cue gating and volumes
//! - `highscores`: Single-integer highscore persistence
//! - `settings`: Immutable tuning and mutable audio preferences

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{SessionContext, SessionOptions, SessionOutcome, start};
pub use highscores::{FileHighscoreStore, HighscoreError, HighscoreStore};
pub use settings::{AudioPreferences, GameConfig};

use glam::Vec2;

/// Fixed constants that are not exposed as tuning
pub mod consts {
    /// Fixed frame timestep used by headless runs (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Longest frame delta handed to the simulation (hitches are clamped)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Hard cap on lives, also the number of heart damage tiers
    pub const MAX_LIVES: u8 = 5;
    /// Index of the most damaged heart image
    pub const MOST_DAMAGED_TIER: u8 = MAX_LIVES - 1;

    /// Fully opaque sprite alpha
    pub const OPAQUE: u8 = 255;
}

/// Heart image tier for a life count: 0 is intact, 4 is most damaged
#[inline]
pub fn damage_tier(lives: u8) -> u8 {
    consts::MAX_LIVES
        .saturating_sub(lives)
        .min(consts::MOST_DAMAGED_TIER)
}

/// Unit vector from `from` toward `to` and the distance between them.
/// Coincident points yield a zero direction.
#[inline]
pub fn heading_to(from: Vec2, to: Vec2) -> (Vec2, f32) {
    let delta = to - from;
    let distance = delta.length();
    if distance > 0.0 {
        (delta / distance, distance)
    } else {
        (Vec2::ZERO, 0.0)
    }
}

/// Unit vector for an angle in radians
#[inline]
pub fn direction_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}
