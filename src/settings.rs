//! Game tuning and audio preferences
//!
//! `GameConfig` is immutable for the lifetime of a session. `AudioPreferences`
//! is the small mutable value the menu toggles and hands to the audio layer.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to read a config file from disk
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Session tuning (immutable once a session starts)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Target frames per second for realtime clocks
    pub fps: u32,

    // === Layout ===
    pub heart_position: Vec2,
    pub heart_scale: f32,
    /// Scale of the base drawn under the heart (collision target when present)
    pub heart_base_scale: f32,
    pub border_position: Vec2,
    pub border_scale: f32,
    /// Inset from the border (or screen) for spawn positions and clamping
    pub spawn_padding: f32,
    /// Mid-bottom anchor of the exit icon
    pub exit_icon_position: Vec2,
    pub exit_icon_scale: f32,

    // === Lives ===
    pub initial_lives: u8,

    // === Pixels ===
    pub pixel_min_size: u32,
    pub pixel_max_size: u32,
    pub pixel_base_speed: f32,
    /// Peak extra speed multiplier reached at the heart (quadratic ramp)
    pub pixel_acceleration: f32,
    /// Distance below which pixels start accelerating
    pub proximity_threshold: f32,
    pub fade_in_duration: f32,
    pub blink_start_interval: f32,
    /// Interval shrink per unit of blink counter
    pub blink_interval_shrink: f32,
    pub blink_min_interval: f32,
    /// Full blinks before a pixel bursts (each blink is two toggles)
    pub max_blinks: f32,

    // === Spawning / difficulty ===
    pub spawn_interval: f32,
    /// Spawn interval decrease per second of play
    pub spawn_decrease_rate: f32,
    pub spawn_min_interval: f32,
    /// Base speed increase per second of play (no ceiling)
    pub speed_increase_rate: f32,
    /// Percent chance of a red pixel
    pub red_odds: f32,
    /// Percent chance of a green pixel
    pub green_odds: f32,
    /// Percent chance of an orange pixel
    pub orange_odds: f32,

    // === Orange splash ===
    pub splash_radius: f32,
    /// Splash pixels appear `splash_radius * splash_distance_factor` beyond the origin
    pub splash_distance_factor: f32,
    /// Maximum angular offset from the heart->origin axis
    pub splash_spread_degrees: f32,
    /// Fraction of the current base speed given to splash pixels
    pub splash_speed_factor: f32,

    // === Scoring ===
    pub white_points: u64,
    pub orange_points: u64,
    /// Awarded for clicking a red pixel and for a red pixel reaching the heart
    pub red_points: u64,

    // === Powerups ===
    pub slow_factor: f32,
    /// Green pixels touching the heart blink before applying their powerup
    pub deferred_green_powerup: bool,

    // === Phases ===
    pub entry_fade_duration: f32,
    pub game_over_delay: f32,
    /// Safety timeout for the falling exit transition
    pub exit_transition_duration: f32,
    pub exit_flash_duration: f32,

    // === Cue volumes ===
    pub explosion_volume: f32,
    pub collect_volume: f32,
    pub death_volume: f32,
    pub game_over_volume: f32,

    // === Particles ===
    pub click_particles: u32,
    pub red_click_particles: u32,
    pub life_loss_particles: u32,
    pub life_loss_spread: f32,
    pub game_over_particles: u32,
    pub game_over_spread: f32,
    pub red_game_over_particles: u32,
    pub red_game_over_spread: f32,

    // === Persistence ===
    pub highscore_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        let screen_width = 940.0;
        let screen_height = 605.0;
        let center = Vec2::new((screen_width / 2.0f32).floor(), (screen_height / 2.0f32).floor());

        Self {
            screen_width,
            screen_height,
            fps: 60,

            heart_position: center,
            heart_scale: 0.1,
            heart_base_scale: 1.3,
            border_position: center,
            border_scale: 2.9,
            spawn_padding: 20.0,
            exit_icon_position: Vec2::new(center.x, screen_height - 30.0),
            exit_icon_scale: 0.125,

            initial_lives: 5,

            pixel_min_size: 10,
            pixel_max_size: 35,
            pixel_base_speed: 15.0,
            pixel_acceleration: 3.0,
            proximity_threshold: 400.0,
            fade_in_duration: 1.0,
            blink_start_interval: 0.5,
            blink_interval_shrink: 0.1,
            blink_min_interval: 0.05,
            max_blinks: 4.0,

            spawn_interval: 3.0,
            spawn_decrease_rate: 0.015,
            spawn_min_interval: 0.5,
            speed_increase_rate: 0.025,
            red_odds: 10.0,
            green_odds: 2.5,
            orange_odds: 10.0,

            splash_radius: 150.0,
            splash_distance_factor: 1.5,
            splash_spread_degrees: 30.0,
            splash_speed_factor: 0.6,

            white_points: 1,
            orange_points: 3,
            red_points: 5,

            slow_factor: 0.5,
            deferred_green_powerup: false,

            entry_fade_duration: 1.0,
            game_over_delay: 1.5,
            exit_transition_duration: 3.0,
            exit_flash_duration: 1.0,

            explosion_volume: 0.4,
            collect_volume: 0.5,
            death_volume: 0.6,
            game_over_volume: 0.7,

            click_particles: 10,
            red_click_particles: 20,
            life_loss_particles: 15,
            life_loss_spread: 20.0,
            game_over_particles: 30,
            game_over_spread: 30.0,
            red_game_over_particles: 40,
            red_game_over_spread: 40.0,

            highscore_path: PathBuf::from("highscore").join("highscore.txt"),
        }
    }
}

impl GameConfig {
    /// Clamp values that would break the simulation.
    ///
    /// Odds are kept within [0, 100] and scaled down proportionally when they
    /// sum past 100. Durations and intervals stay strictly positive.
    pub fn sanitized(mut self) -> Self {
        const MIN_DURATION: f32 = 1e-3;

        self.red_odds = self.red_odds.clamp(0.0, 100.0);
        self.green_odds = self.green_odds.clamp(0.0, 100.0);
        self.orange_odds = self.orange_odds.clamp(0.0, 100.0);
        let total = self.red_odds + self.green_odds + self.orange_odds;
        if total > 100.0 {
            let scale = 100.0 / total;
            log::warn!("Pixel odds sum to {total}%, scaling down to 100%");
            self.red_odds *= scale;
            self.green_odds *= scale;
            self.orange_odds *= scale;
        }

        self.pixel_min_size = self.pixel_min_size.max(1);
        self.pixel_max_size = self.pixel_max_size.max(1);
        if self.pixel_min_size > self.pixel_max_size {
            std::mem::swap(&mut self.pixel_min_size, &mut self.pixel_max_size);
        }

        self.initial_lives = self.initial_lives.clamp(1, crate::consts::MAX_LIVES);
        self.pixel_base_speed = self.pixel_base_speed.max(0.0);
        self.pixel_acceleration = self.pixel_acceleration.max(0.0);
        self.proximity_threshold = self.proximity_threshold.max(MIN_DURATION);
        self.spawn_min_interval = self.spawn_min_interval.max(MIN_DURATION);
        self.spawn_interval = self.spawn_interval.max(self.spawn_min_interval);
        self.spawn_decrease_rate = self.spawn_decrease_rate.max(0.0);
        self.fade_in_duration = self.fade_in_duration.max(MIN_DURATION);
        self.blink_min_interval = self.blink_min_interval.max(MIN_DURATION);
        self.blink_start_interval = self.blink_start_interval.max(self.blink_min_interval);
        self.max_blinks = self.max_blinks.max(0.5);
        self.entry_fade_duration = self.entry_fade_duration.max(0.0);
        self.game_over_delay = self.game_over_delay.max(0.0);
        self.exit_transition_duration = self.exit_transition_duration.max(0.0);
        self.exit_flash_duration = self.exit_flash_duration.max(0.0);
        self.fps = self.fps.max(1);
        self
    }

    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Load a JSON config from disk
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load a JSON config, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from_path(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}; using default config");
                Self::default()
            }
        }
    }
}

/// Music / sound-effect toggles and volumes, owned by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioPreferences {
    pub music_enabled: bool,
    pub sound_effects_enabled: bool,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for AudioPreferences {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sound_effects_enabled: true,
            music_volume: 0.4,
            sfx_volume: 0.5,
        }
    }
}

impl AudioPreferences {
    pub fn new(music_enabled: bool, sound_effects_enabled: bool) -> Self {
        Self {
            music_enabled,
            sound_effects_enabled,
            ..Self::default()
        }
    }

    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_already_sane() {
        let config = GameConfig::default();
        assert_eq!(config.clone().sanitized(), config);
        assert_eq!(config.heart_position, Vec2::new(470.0, 302.0));
        assert_eq!(config.exit_icon_position, Vec2::new(470.0, 575.0));
    }

    #[test]
    fn test_sanitize_scales_odds() {
        let config = GameConfig {
            red_odds: 80.0,
            green_odds: 40.0,
            orange_odds: 80.0,
            ..GameConfig::default()
        }
        .sanitized();
        let total = config.red_odds + config.green_odds + config.orange_odds;
        assert!((total - 100.0).abs() < 1e-3);
        assert!((config.red_odds - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_sanitize_orders_sizes_and_intervals() {
        let config = GameConfig {
            pixel_min_size: 40,
            pixel_max_size: 0,
            spawn_interval: -2.0,
            initial_lives: 9,
            ..GameConfig::default()
        }
        .sanitized();
        assert_eq!(config.pixel_min_size, 1);
        assert_eq!(config.pixel_max_size, 40);
        assert!(config.spawn_interval >= config.spawn_min_interval);
        assert_eq!(config.initial_lives, 5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "red_odds": 50.0, "initial_lives": 3 }"#)
            .expect("valid json");
        assert_eq!(config.red_odds, 50.0);
        assert_eq!(config.initial_lives, 3);
        assert_eq!(config.orange_odds, 10.0);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = GameConfig::load_or_default(Path::new("/definitely/not/here.json"));
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_audio_volume_clamps() {
        let mut prefs = AudioPreferences::new(false, true);
        prefs.set_sfx_volume(3.0);
        prefs.set_music_volume(-1.0);
        assert_eq!(prefs.sfx_volume, 1.0);
        assert_eq!(prefs.music_volume, 0.0);
        assert!(!prefs.music_enabled);
    }
}
