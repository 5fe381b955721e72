//! Sound cue gating
//!
//! The simulation only names cues; `AudioManager` decides whether and how
//! loud they play, and forwards to whatever backend the host provides.

use serde::{Deserialize, Serialize};

use crate::settings::{AudioPreferences, GameConfig};

/// Sound effect cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Pixel clicked, exit icon pressed, or a blink finished
    Explosion,
    /// Life lost
    Death,
    /// Powerup collected
    Collect,
    /// Game over sequence started
    GameOver,
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicTrack {
    Game,
}

/// Fire-and-forget playback provided by the host.
///
/// Implementations silently skip cues whose sound failed to load.
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
    fn play_music(&mut self, track: MusicTrack, volume: f32);
    fn stop_music(&mut self);
}

/// Backend that plays nothing (headless runs, missing audio device)
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioBackend for SilentAudio {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
    fn play_music(&mut self, _track: MusicTrack, _volume: f32) {}
    fn stop_music(&mut self) {}
}

/// Per-cue volumes taken from the config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueVolumes {
    pub explosion: f32,
    pub collect: f32,
    pub death: f32,
    pub game_over: f32,
}

impl CueVolumes {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            explosion: config.explosion_volume,
            collect: config.collect_volume,
            death: config.death_volume,
            game_over: config.game_over_volume,
        }
    }

    pub fn get(&self, effect: SoundEffect) -> f32 {
        match effect {
            SoundEffect::Explosion => self.explosion,
            SoundEffect::Collect => self.collect,
            SoundEffect::Death => self.death,
            SoundEffect::GameOver => self.game_over,
        }
    }
}

/// Audio manager for a play session
pub struct AudioManager<'a> {
    backend: &'a mut dyn AudioBackend,
    prefs: AudioPreferences,
    volumes: CueVolumes,
    music_playing: bool,
}

impl<'a> AudioManager<'a> {
    pub fn new(backend: &'a mut dyn AudioBackend, prefs: AudioPreferences, config: &GameConfig) -> Self {
        Self {
            backend,
            prefs,
            volumes: CueVolumes::from_config(config),
            music_playing: false,
        }
    }

    pub fn preferences(&self) -> AudioPreferences {
        self.prefs
    }

    /// Play a cue if sound effects are enabled, at its own volume scaled by
    /// the sound-effects volume
    pub fn play(&mut self, effect: SoundEffect) {
        if !self.prefs.sound_effects_enabled {
            return;
        }
        let vol = self.volumes.get(effect) * self.prefs.sfx_volume;
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol);
    }

    /// Start the game track if music is enabled
    pub fn start_music(&mut self) {
        if !self.prefs.music_enabled {
            return;
        }
        self.backend.stop_music();
        self.backend.play_music(MusicTrack::Game, self.prefs.music_volume);
        self.music_playing = true;
    }

    pub fn stop_music(&mut self) {
        if self.music_playing {
            self.backend.stop_music();
            self.music_playing = false;
        }
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }
}
