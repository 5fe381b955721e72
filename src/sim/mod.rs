//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame delta only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies; side effects leave as `GameEvent`s

pub mod arena;
pub mod collision;
pub mod pixel;
pub mod rect;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use pixel::{Blink, BlinkEffect, GamePixel, PixelKind, PixelState, proximity_factor};
pub use rect::Rect;
pub use scoring::Powerup;
pub use spawner::{SPLASH_COUNT, Spawner, base_speed_at, spawn_interval_at, spawn_one, spawn_splash_pair};
pub use state::{ExitButton, ExitStage, GameEvent, GamePhase, GameState, ParticleColor};
pub use tick::{PointerEvent, TickInput, tick};
