//! Pixel spawning and the difficulty ramp
//!
//! The spawn interval shrinks linearly with play time down to a floor. The
//! base speed grows linearly with no ceiling.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pixel::{GamePixel, PixelKind};
use super::rect::Rect;
use crate::settings::GameConfig;
use crate::{direction_from_angle, heading_to};

/// Number of white pixels an orange pixel splits into
pub const SPLASH_COUNT: usize = 2;

/// Seconds between spawns after `elapsed` seconds of play
pub fn spawn_interval_at(elapsed: f32, config: &GameConfig) -> f32 {
    (config.spawn_interval - elapsed * config.spawn_decrease_rate).max(config.spawn_min_interval)
}

/// Speed of newly spawned pixels after `elapsed` seconds of play
pub fn base_speed_at(elapsed: f32, config: &GameConfig) -> f32 {
    config.pixel_base_speed + elapsed * config.speed_increase_rate
}

/// Spawn timing accumulator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Seconds since the last spawn
    pub since_last: f32,
}

impl Spawner {
    /// Accumulate `dt`; returns `true` (and resets) once the current interval has passed
    pub fn should_spawn(&mut self, dt: f32, elapsed: f32, config: &GameConfig) -> bool {
        self.since_last += dt;
        if self.since_last >= spawn_interval_at(elapsed, config) {
            self.since_last = 0.0;
            true
        } else {
            false
        }
    }
}

/// Weighted colour roll: red, green and orange take their percentages in
/// that order, white gets the remainder.
pub fn roll_kind<R: Rng>(rng: &mut R, config: &GameConfig) -> PixelKind {
    let roll = rng.random_range(1..=100u32) as f32;
    kind_for_roll(roll, config)
}

fn kind_for_roll(roll: f32, config: &GameConfig) -> PixelKind {
    let red = config.red_odds;
    let green = red + config.green_odds;
    let orange = green + config.orange_odds;

    if roll <= red {
        PixelKind::Red
    } else if roll <= green {
        PixelKind::Green
    } else if roll <= orange {
        PixelKind::Orange
    } else {
        PixelKind::White
    }
}

fn roll_size<R: Rng>(rng: &mut R, config: &GameConfig) -> f32 {
    rng.random_range(config.pixel_min_size..=config.pixel_max_size) as f32
}

/// Border edge a pixel enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Initial heading pointing into the play area (screen space, y down)
    pub fn inward_heading(&self) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI};
        match self {
            Edge::Top => FRAC_PI_2,
            Edge::Right => PI,
            Edge::Bottom => 3.0 * FRAC_PI_2,
            Edge::Left => 0.0,
        }
    }
}

/// Create one pixel on a random edge of `bounds` (id assigned by the caller)
pub fn spawn_one<R: Rng>(rng: &mut R, bounds: &Rect, speed: f32, config: &GameConfig) -> GamePixel {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let along_x = rng.random_range(bounds.left()..=bounds.right());
    let along_y = rng.random_range(bounds.top()..=bounds.bottom());

    let pos = match edge {
        Edge::Top => Vec2::new(along_x, bounds.top()),
        Edge::Right => Vec2::new(bounds.right(), along_y),
        Edge::Bottom => Vec2::new(along_x, bounds.bottom()),
        Edge::Left => Vec2::new(bounds.left(), along_y),
    };

    let kind = roll_kind(rng, config);
    let size = roll_size(rng, config);
    GamePixel::new(0, pos, edge.inward_heading(), kind, size, speed)
}

/// Two white pixels thrown further out from the heart than `origin`.
///
/// The first leaves at up to `splash_spread_degrees` on one side of the
/// heart->origin axis, the second on the other side. Both are clamped into
/// `bounds` and move at a fraction of `base_speed`. Nothing spawns when
/// `origin` sits exactly on the heart.
pub fn spawn_splash_pair<R: Rng>(
    rng: &mut R,
    origin: Vec2,
    heart: Vec2,
    bounds: &Rect,
    base_speed: f32,
    config: &GameConfig,
) -> Vec<GamePixel> {
    let (axis, distance) = heading_to(heart, origin);
    if distance <= 0.0 {
        return Vec::new();
    }

    let spread = config.splash_spread_degrees.abs().to_radians();
    let axis_angle = axis.y.atan2(axis.x);
    let throw = config.splash_radius * config.splash_distance_factor;
    let speed = base_speed * config.splash_speed_factor;

    (0..SPLASH_COUNT)
        .map(|i| {
            let offset = if i == 0 {
                rng.random_range(-spread..=0.0)
            } else {
                rng.random_range(0.0..=spread)
            };
            let angle = axis_angle + offset;
            let pos = bounds.clamp_point(origin + direction_from_angle(angle) * throw);
            let size = roll_size(rng, config);
            GamePixel::new(0, pos, angle, PixelKind::White, size, speed)
        })
        .collect()
}
