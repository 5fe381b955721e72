//! Hazard pixels converging on the heart
//!
//! A pixel only ever moves forward through its lifecycle:
//! `FadingIn -> Active -> Blinking -> Dead`, with `Dead` reachable from any
//! state through `mark_dead`. Whatever a blink was going to do to the heart is
//! carried into `Dead` and resolved once, when the pixel is removed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::OPAQUE;
use crate::heading_to;
use crate::settings::GameConfig;

/// Pixel colour category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PixelKind {
    /// Click to destroy; damages the heart on contact
    #[default]
    White,
    /// Never click; harmless (and worth points) on contact
    Red,
    /// Powerup on click or contact; a click also clears whites and oranges
    Green,
    /// Splits into two whites when clicked; damages the heart on contact
    Orange,
}

impl PixelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PixelKind::White => "white",
            PixelKind::Red => "red",
            PixelKind::Green => "green",
            PixelKind::Orange => "orange",
        }
    }

    /// Points for destroying this pixel by click
    pub fn click_points(&self, config: &GameConfig) -> u64 {
        match self {
            PixelKind::White => config.white_points,
            PixelKind::Red => config.red_points,
            PixelKind::Green => 0,
            PixelKind::Orange => config.orange_points,
        }
    }
}

/// What happens when a blink finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlinkEffect {
    /// Burst only
    None,
    DamageHeart,
    ApplyPowerup,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blink {
    pub timer: f32,
    pub interval: f32,
    /// Advances by 0.5 per visibility toggle
    pub count: f32,
    pub visible: bool,
    pub effect: BlinkEffect,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PixelState {
    FadingIn,
    Active,
    Blinking(Blink),
    /// `after_blink` is set when the pixel was blinking as it died
    Dead { after_blink: Option<BlinkEffect> },
}

/// Speed multiplier for a pixel `distance` away from its target.
///
/// Below `threshold` the multiplier grows with the square of how far past the
/// threshold the pixel is; at or beyond it the pixel moves at base speed.
#[inline]
pub fn proximity_factor(distance: f32, threshold: f32, acceleration: f32) -> f32 {
    if distance < threshold {
        let progress = (1.0 - distance / threshold).clamp(0.0, 1.0);
        1.0 + acceleration * progress * progress
    } else {
        1.0
    }
}

/// A single hazard pixel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamePixel {
    pub id: u32,
    pub pos: Vec2,
    /// Spawn heading in radians; movement is recomputed toward the target each tick
    pub heading: f32,
    pub kind: PixelKind,
    /// Edge length of the square sprite
    pub size: f32,
    pub speed: f32,
    pub state: PixelState,
    pub fade_timer: f32,
    pub alpha: u8,
}

impl GamePixel {
    pub fn new(id: u32, pos: Vec2, heading: f32, kind: PixelKind, size: f32, speed: f32) -> Self {
        Self {
            id,
            pos,
            heading,
            kind,
            size,
            speed,
            state: PixelState::FadingIn,
            fade_timer: 0.0,
            alpha: 0,
        }
    }

    /// Advance one frame toward `target`. Returns `false` once the pixel should be removed.
    pub fn tick(&mut self, dt: f32, target: Vec2, config: &GameConfig) -> bool {
        match &mut self.state {
            PixelState::Dead { .. } => return false,
            PixelState::Blinking(blink) => {
                blink.timer += dt;
                if blink.timer >= blink.interval {
                    blink.visible = !blink.visible;
                    self.alpha = if blink.visible { OPAQUE } else { 0 };
                    blink.timer = 0.0;
                    blink.count += 0.5;
                    blink.interval = (config.blink_start_interval
                        - config.blink_interval_shrink * blink.count)
                        .max(config.blink_min_interval);

                    if blink.count >= config.max_blinks {
                        let effect = blink.effect;
                        self.state = PixelState::Dead {
                            after_blink: Some(effect),
                        };
                        return false;
                    }
                }
                // Frozen in place while blinking
                return true;
            }
            PixelState::FadingIn | PixelState::Active => {}
        }

        if self.fade_timer < config.fade_in_duration {
            self.fade_timer += dt;
            let t = (self.fade_timer / config.fade_in_duration).min(1.0);
            self.alpha = (f32::from(OPAQUE) * t) as u8;
            if self.fade_timer >= config.fade_in_duration {
                self.state = PixelState::Active;
            }
        }

        let (dir, distance) = heading_to(self.pos, target);
        let speed = self.speed
            * proximity_factor(
                distance,
                config.proximity_threshold,
                config.pixel_acceleration,
            );
        self.pos += dir * speed * dt;

        true
    }

    /// Start blinking after touching the heart. Returns `false` (and does
    /// nothing) if the pixel is already blinking or dead.
    pub fn begin_blink(&mut self, effect: BlinkEffect, config: &GameConfig) -> bool {
        match self.state {
            PixelState::Blinking(_) | PixelState::Dead { .. } => false,
            PixelState::FadingIn | PixelState::Active => {
                self.state = PixelState::Blinking(Blink {
                    timer: 0.0,
                    interval: config.blink_start_interval,
                    count: 0.0,
                    visible: true,
                    effect,
                });
                true
            }
        }
    }

    /// Kill the pixel outright. A blink in progress keeps its pending effect.
    pub fn mark_dead(&mut self) {
        self.state = match self.state {
            PixelState::Dead { after_blink } => PixelState::Dead { after_blink },
            PixelState::Blinking(blink) => PixelState::Dead {
                after_blink: Some(blink.effect),
            },
            PixelState::FadingIn | PixelState::Active => PixelState::Dead { after_blink: None },
        };
    }

    /// Kill the pixel after its powerup was collected directly. A pending
    /// `ApplyPowerup` blink is dropped; any other pending effect is kept.
    pub fn mark_collected(&mut self) {
        self.mark_dead();
        if let PixelState::Dead {
            after_blink: Some(BlinkEffect::ApplyPowerup),
        } = self.state
        {
            self.state = PixelState::Dead { after_blink: None };
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.size))
    }

    pub fn collides_with(&self, target: &Rect) -> bool {
        self.rect().intersects(target)
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        self.rect().contains_point(point)
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        matches!(self.state, PixelState::Dead { .. })
    }

    #[inline]
    pub fn is_blinking(&self) -> bool {
        matches!(self.state, PixelState::Blinking(_))
    }

    /// Opacity to draw with; zero while hidden mid-blink
    pub fn draw_alpha(&self) -> u8 {
        match self.state {
            PixelState::Blinking(blink) if !blink.visible => 0,
            PixelState::Dead { .. } => 0,
            _ => self.alpha,
        }
    }
}
