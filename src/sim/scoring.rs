//! Score, lives, powerups and the game-over trigger

use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use super::pixel::PixelKind;
use super::state::{GameEvent, GamePhase, GameState, ParticleColor};
use crate::audio::SoundEffect;
use crate::consts::{MAX_LIVES, MOST_DAMAGED_TIER};
use crate::damage_tier;

/// Powerups granted by green pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Powerup {
    /// Kill half of the live white pixels
    ClearHalfWhite,
    /// Halve the speed of every live pixel for the rest of its life
    SlowAllPixels,
    /// One more life, up to the cap
    ExtraLife,
}

impl Powerup {
    pub const ALL: [Powerup; 3] = [
        Powerup::ClearHalfWhite,
        Powerup::SlowAllPixels,
        Powerup::ExtraLife,
    ];
}

impl GameState {
    /// Add points; a score past the highscore becomes the new highscore
    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
        if self.score > self.highscore {
            self.highscore = self.score;
            self.emit(GameEvent::NewHighscore(self.highscore));
        }
    }

    /// The heart takes a hit
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        log::debug!("Life lost, {} remaining", self.lives);

        self.emit(GameEvent::Sound(SoundEffect::Death));
        self.emit(GameEvent::LifeLost { lives: self.lives });
        let center = self.arena.heart_center;
        let (count, spread) = (self.config.life_loss_particles, self.config.life_loss_spread);
        self.burst(center, ParticleColor::Red, count, spread);

        if self.lives == 0 {
            self.trigger_game_over(false);
        }
        self.heart_tier = damage_tier(self.lives);
    }

    /// Apply a uniformly chosen powerup
    pub fn apply_powerup(&mut self) -> Powerup {
        let powerup = Powerup::ALL[self.rng.random_range(0..Powerup::ALL.len())];
        self.apply_specific_powerup(powerup);
        powerup
    }

    pub fn apply_specific_powerup(&mut self, powerup: Powerup) {
        log::debug!("Powerup: {powerup:?}");
        match powerup {
            Powerup::ClearHalfWhite => {
                let whites: Vec<usize> = self
                    .pixels
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.kind == PixelKind::White && !p.is_dead())
                    .map(|(i, _)| i)
                    .collect();
                let amount = whites.len() / 2;
                for pick in index::sample(&mut self.rng, whites.len(), amount) {
                    self.pixels[whites[pick]].mark_dead();
                }
            }
            Powerup::SlowAllPixels => {
                // Permanent for each pixel already on the board
                let factor = self.config.slow_factor;
                for pixel in &mut self.pixels {
                    pixel.speed *= factor;
                }
            }
            Powerup::ExtraLife => {
                if self.lives < MAX_LIVES {
                    self.lives += 1;
                    self.heart_tier = damage_tier(self.lives);
                }
            }
        }
        self.emit(GameEvent::PowerupApplied(powerup));
    }

    /// Start the game-over sequence. Only the first call per session has any effect.
    pub fn trigger_game_over(&mut self, from_red: bool) {
        if !self.phase.can_game_over() {
            return;
        }
        log::info!("Game over (score {}, red pixel: {from_red})", self.score);

        self.emit(GameEvent::Sound(SoundEffect::GameOver));
        let (count, spread) = if from_red {
            (
                self.config.red_game_over_particles,
                self.config.red_game_over_spread,
            )
        } else {
            (self.config.game_over_particles, self.config.game_over_spread)
        };
        let center = self.arena.heart_center;
        self.burst(center, ParticleColor::Red, count, spread);
        self.emit(GameEvent::GameOver { from_red });

        self.phase = GamePhase::GameOverPending {
            elapsed: 0.0,
            from_red,
        };
    }

    /// Red pixel clicked: the heart is destroyed outright
    pub(crate) fn shatter_heart(&mut self) {
        self.lives = 0;
        self.heart_tier = MOST_DAMAGED_TIER;
    }
}
