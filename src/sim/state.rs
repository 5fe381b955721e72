//! Session state and core simulation types
//!
//! Everything the simulation mutates lives in `GameState`. Collaborators
//! only ever see it through shared references (rendering) or the drained
//! event queue (sound, particles, persistence).

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::pixel::{GamePixel, PixelKind};
use super::scoring::Powerup;
use super::spawner::{Spawner, base_speed_at, spawn_interval_at};
use crate::audio::SoundEffect;
use crate::damage_tier;
use crate::settings::GameConfig;

/// Current phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// White fade-in over the freshly started game
    EnteringFade { elapsed: f32 },
    /// Active gameplay
    Playing,
    /// Heart destroyed; the explosion plays out before the exit starts
    GameOverPending { elapsed: f32, from_red: bool },
    /// Leaving for the menu
    Exiting(ExitStage),
    /// Session over, control returns to the menu
    Finished,
}

impl GamePhase {
    /// Phases in which pointer input and the simulation run
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            GamePhase::EnteringFade { .. } | GamePhase::Playing | GamePhase::GameOverPending { .. }
        )
    }

    /// Phases from which a game over may still start
    pub fn can_game_over(&self) -> bool {
        matches!(self, GamePhase::EnteringFade { .. } | GamePhase::Playing)
    }
}

/// Sub-stages of the exit sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ExitStage {
    /// Scene elements fall off screen (external transition effect)
    Falling { elapsed: f32 },
    /// White flash fading out
    Flash { elapsed: f32 },
}

/// Colour tag for cosmetic particle bursts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleColor {
    White,
    Red,
    Green,
    Orange,
}

impl From<PixelKind> for ParticleColor {
    fn from(kind: PixelKind) -> Self {
        match kind {
            PixelKind::White => ParticleColor::White,
            PixelKind::Red => ParticleColor::Red,
            PixelKind::Green => ParticleColor::Green,
            PixelKind::Orange => ParticleColor::Orange,
        }
    }
}

/// Side effects requested by the simulation, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Cosmetic burst of `count` particles scattered up to `spread` around `pos`
    ParticleBurst {
        pos: Vec2,
        color: ParticleColor,
        count: u32,
        spread: f32,
    },
    Sound(SoundEffect),
    /// Score passed the stored highscore; persist the new value
    NewHighscore(u64),
    PowerupApplied(Powerup),
    LifeLost { lives: u8 },
    GameOver { from_red: bool },
    /// Exit transition began: stop music, flush the highscore, start the fall effect
    ExitStarted,
    /// Exit flash done; return to the menu
    Finished,
}

/// Hover/press state of the in-game exit icon
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitButton {
    pub hovered: bool,
    pub pressed: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub arena: Arena,
    /// Seed the session RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Lives remaining, always within [0, MAX_LIVES]
    pub lives: u8,
    /// Heart image index, 0 (intact) to 4 (most damaged)
    pub heart_tier: u8,
    pub score: u64,
    pub highscore: u64,
    /// Seconds of play driving the difficulty ramp
    pub difficulty_time: f32,
    /// Current seconds between spawns
    pub spawn_interval: f32,
    /// Current speed given to newly spawned pixels
    pub base_speed: f32,
    pub spawner: Spawner,
    /// Live pixels, in spawn order (click hit-testing walks this order)
    pub pixels: Vec<GamePixel>,
    pub exit_button: ExitButton,
    /// Last known pointer position
    pub pointer: Vec2,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Fresh session. `highscore` is whatever the store produced (0 when unavailable).
    /// The config is sanitized first, so out-of-range tuning can't panic mid-session.
    pub fn new(config: GameConfig, arena: Arena, highscore: u64, seed: u64, skip_entry_fade: bool) -> Self {
        let config = config.sanitized();
        let phase = if skip_entry_fade {
            GamePhase::Playing
        } else {
            GamePhase::EnteringFade { elapsed: 0.0 }
        };
        let lives = config.initial_lives.min(crate::consts::MAX_LIVES);

        Self {
            spawn_interval: spawn_interval_at(0.0, &config),
            base_speed: base_speed_at(0.0, &config),
            config,
            arena,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase,
            lives,
            heart_tier: damage_tier(lives),
            score: 0,
            highscore,
            difficulty_time: 0.0,
            spawner: Spawner::default(),
            pixels: Vec::new(),
            exit_button: ExitButton::default(),
            pointer: Vec2::ZERO,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a pixel to the live set, assigning it a fresh ID
    pub fn add_pixel(&mut self, mut pixel: GamePixel) -> u32 {
        pixel.id = self.next_entity_id();
        let id = pixel.id;
        self.pixels.push(pixel);
        id
    }

    pub fn pixel(&self, id: u32) -> Option<&GamePixel> {
        self.pixels.iter().find(|p| p.id == id)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn burst(&mut self, pos: Vec2, color: ParticleColor, count: u32, spread: f32) {
        self.emit(GameEvent::ParticleBurst {
            pos,
            color,
            count,
            spread,
        });
    }

    /// Events produced since the last drain, oldest first
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Opacity of the white entry fade overlay (0.0 when not fading)
    pub fn entry_fade_alpha(&self) -> f32 {
        match self.phase {
            GamePhase::EnteringFade { elapsed } if self.config.entry_fade_duration > 0.0 => {
                1.0 - (elapsed / self.config.entry_fade_duration).min(1.0)
            }
            _ => 0.0,
        }
    }

    /// Opacity of the white exit flash (0.0 outside the flash stage)
    pub fn exit_flash_alpha(&self) -> f32 {
        match self.phase {
            GamePhase::Exiting(ExitStage::Flash { elapsed }) if self.config.exit_flash_duration > 0.0 => {
                1.0 - (elapsed / self.config.exit_flash_duration).min(1.0)
            }
            _ => 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }
}

/// Default-config session on a bare arena, shared by the sim tests
#[cfg(test)]
pub(crate) fn test_state(skip_entry_fade: bool) -> GameState {
    test_state_with(GameConfig::default(), skip_entry_fade)
}

#[cfg(test)]
pub(crate) fn test_state_with(config: GameConfig, skip_entry_fade: bool) -> GameState {
    let arena = Arena::new(
        Vec2::new(config.screen_width, config.screen_height),
        config.heart_position,
        Vec2::splat(10.0),
        config.spawn_padding,
    );
    GameState::new(config, arena, 0, 12345, skip_entry_fade)
}
