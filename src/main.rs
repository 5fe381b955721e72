//! Headless autoplay runner
//!
//! Plays one session without a window: a simple autopilot clicks whatever
//! non-red pixel is closest to the heart, a few times per second.
//!
//! Usage: `heart-guard [config.json]`

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use glam::Vec2;
use heart_guard::audio::SilentAudio;
use heart_guard::consts::SIM_DT;
use heart_guard::game::{InstantTransition, NoParticles};
use heart_guard::platform::{FixedClock, InputEvent, InputSource};
use heart_guard::renderer::{Color, Renderer, SizedAssets, SpriteId};
use heart_guard::sim::{PixelKind, Rect};
use heart_guard::{FileHighscoreStore, GameConfig, SessionContext, SessionOptions, start};

/// Frames between autopilot clicks
const CLICK_EVERY: u32 = 20;
/// Give up after ten minutes of simulated play
const MAX_FRAMES: u32 = 60 * 60 * 10;

type Sightings = Rc<RefCell<Vec<(PixelKind, Rect)>>>;

/// Renderer that only remembers where pixels were drawn
struct PixelTracker {
    seen: Sightings,
    frame: Vec<(PixelKind, Rect)>,
}

impl Renderer for PixelTracker {
    fn clear(&mut self, _color: Color) {
        self.frame.clear();
    }

    fn draw_sprite(&mut self, sprite: SpriteId, dest: Rect, _opacity: f32) {
        if let SpriteId::Pixel(kind) = sprite {
            self.frame.push((kind, dest));
        }
    }

    fn fill_rect(&mut self, _rect: Rect, _color: Color) {}

    fn draw_text(&mut self, _text: &str, _midtop: Vec2, _color: Color) {}

    fn present(&mut self) {
        *self.seen.borrow_mut() = std::mem::take(&mut self.frame);
    }
}

struct Autopilot {
    seen: Sightings,
    heart: Vec2,
    frame: u32,
}

impl InputSource for Autopilot {
    fn poll(&mut self, out: &mut Vec<InputEvent>) {
        self.frame += 1;
        if self.frame >= MAX_FRAMES {
            log::info!("Autopilot time limit reached");
            out.push(InputEvent::QuitRequested);
            return;
        }
        if self.frame % CLICK_EVERY != 0 {
            return;
        }

        let heart = self.heart;
        let target = self
            .seen
            .borrow()
            .iter()
            .filter(|(kind, _)| *kind != PixelKind::Red)
            .map(|(_, rect)| rect.center())
            .min_by(|a, b| {
                a.distance(heart)
                    .partial_cmp(&b.distance(heart))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        if let Some(pos) = target {
            out.push(InputEvent::PointerMoved(pos));
            out.push(InputEvent::ButtonDown(pos));
            out.push(InputEvent::ButtonUp(pos));
        }
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Heart Guard (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_or_default(&PathBuf::from(path)),
        None => GameConfig::default(),
    };

    // Pixel sprites "load" so the tracker sees them; everything else uses placeholders
    let assets = [PixelKind::White, PixelKind::Red, PixelKind::Green, PixelKind::Orange]
        .into_iter()
        .fold(SizedAssets::default(), |assets, kind| {
            assets.with(SpriteId::Pixel(kind), Vec2::splat(10.0))
        });

    let seen = Sightings::default();
    let mut renderer = PixelTracker {
        seen: seen.clone(),
        frame: Vec::new(),
    };
    let mut input = Autopilot {
        seen,
        heart: config.heart_position,
        frame: 0,
    };
    let mut clock = FixedClock::new(SIM_DT);
    let mut audio = SilentAudio;
    let mut highscores = FileHighscoreStore::new(config.highscore_path.clone());
    let mut particles = NoParticles;
    let mut transition = InstantTransition;

    let ctx = SessionContext {
        renderer: &mut renderer,
        assets: &assets,
        input: &mut input,
        clock: &mut clock,
        audio: &mut audio,
        highscores: &mut highscores,
        particles: &mut particles,
        transition: &mut transition,
    };
    let options = SessionOptions {
        skip_entry_fade: true,
        ..SessionOptions::default()
    };
    let outcome = start(config, ctx, options);

    println!(
        "Score: {}  Highscore: {}  ({})",
        outcome.score,
        outcome.highscore,
        if outcome.return_to_menu {
            "returned to menu"
        } else {
            "quit"
        }
    );
}
