//! Play session entry point and frame loop
//!
//! One frame: poll input, advance the exit transition, tick the simulation,
//! hand the drained events to the collaborators, draw, present, then let the
//! clock hold the frame rate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::audio::{AudioBackend, AudioManager};
use crate::highscores::{HighscoreStore, load_or_zero};
use crate::platform::{Clock, InputEvent, InputSource};
use crate::renderer::frame::{SceneElement, draw_overlays, draw_scene, scene_elements};
use crate::renderer::layout::build_arena;
use crate::renderer::{AssetCatalog, Renderer};
use crate::settings::{AudioPreferences, GameConfig};
use crate::sim::{ExitStage, GameEvent, GamePhase, GameState, ParticleColor, TickInput, tick};

/// Cosmetic particle bursts; the simulation never reads them back
pub trait ParticleSystem {
    fn spawn_burst(&mut self, pos: Vec2, color: ParticleColor, count: u32, spread: f32);
    fn update(&mut self, dt: f32);
    fn draw(&self, renderer: &mut dyn Renderer);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoParticles;

impl ParticleSystem for NoParticles {
    fn spawn_burst(&mut self, _pos: Vec2, _color: ParticleColor, _count: u32, _spread: f32) {}
    fn update(&mut self, _dt: f32) {}
    fn draw(&self, _renderer: &mut dyn Renderer) {}
}

/// The "scene falls off screen" effect played when leaving for the menu
pub trait TransitionEffect {
    fn start(&mut self, elements: Vec<SceneElement>);
    /// Advance the effect; `false` once it has finished
    fn update(&mut self, dt: f32) -> bool;
    fn draw(&self, renderer: &mut dyn Renderer);
}

/// Transition that finishes as soon as it starts
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantTransition;

impl TransitionEffect for InstantTransition {
    fn start(&mut self, _elements: Vec<SceneElement>) {}
    fn update(&mut self, _dt: f32) -> bool {
        false
    }
    fn draw(&self, _renderer: &mut dyn Renderer) {}
}

/// Flags the menu passes when starting a session
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionOptions {
    pub skip_entry_fade: bool,
    /// The caller's music/sound toggles and volumes
    pub audio: AudioPreferences,
    /// Fixed RNG seed; a random one is drawn when `None`
    pub seed: Option<u64>,
}

/// How the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// `true` after the exit sequence, `false` when the host asked to quit
    pub return_to_menu: bool,
    pub score: u64,
    pub highscore: u64,
}

/// Host collaborators for one session
pub struct SessionContext<'a> {
    pub renderer: &'a mut dyn Renderer,
    pub assets: &'a dyn AssetCatalog,
    pub input: &'a mut dyn InputSource,
    pub clock: &'a mut dyn Clock,
    pub audio: &'a mut dyn AudioBackend,
    pub highscores: &'a mut dyn HighscoreStore,
    pub particles: &'a mut dyn ParticleSystem,
    pub transition: &'a mut dyn TransitionEffect,
}

struct Session<'a> {
    state: GameState,
    renderer: &'a mut dyn Renderer,
    assets: &'a dyn AssetCatalog,
    audio: AudioManager<'a>,
    highscores: &'a mut dyn HighscoreStore,
    particles: &'a mut dyn ParticleSystem,
    transition: &'a mut dyn TransitionEffect,
    /// Last value the store accepted
    saved_highscore: u64,
}

impl Session<'_> {
    fn save_highscore(&mut self, score: u64) {
        match self.highscores.save(score) {
            Ok(()) => self.saved_highscore = score,
            Err(e) => log::warn!("Could not save highscore {score}: {e}"),
        }
    }

    fn flush_highscore(&mut self) {
        if self.state.highscore != self.saved_highscore {
            self.save_highscore(self.state.highscore);
        }
    }

    fn dispatch(&mut self, events: Vec<GameEvent>) {
        for event in events {
            match event {
                GameEvent::ParticleBurst {
                    pos,
                    color,
                    count,
                    spread,
                } => self.particles.spawn_burst(pos, color, count, spread),
                GameEvent::Sound(effect) => self.audio.play(effect),
                GameEvent::NewHighscore(score) => self.save_highscore(score),
                GameEvent::PowerupApplied(_) | GameEvent::LifeLost { .. } => {}
                GameEvent::GameOver { from_red } => {
                    log::info!("Game over (red pixel: {from_red}), final score {}", self.state.score);
                }
                GameEvent::ExitStarted => {
                    log::info!("Exit transition started");
                    self.audio.stop_music();
                    self.flush_highscore();
                    let elements = scene_elements(&self.state, self.assets);
                    self.transition.start(elements);
                }
                GameEvent::Finished => log::info!("Session finished, returning to menu"),
            }
        }
    }

    fn draw(&mut self) {
        draw_scene(self.renderer, self.assets, &self.state);
        if matches!(self.state.phase, GamePhase::Exiting(ExitStage::Falling { .. })) {
            self.transition.draw(self.renderer);
        } else if !matches!(self.state.phase, GamePhase::Exiting(_) | GamePhase::Finished) {
            self.particles.draw(self.renderer);
        }
        draw_overlays(self.renderer, &self.state);
        self.renderer.present();
    }

    fn outcome(&self, return_to_menu: bool) -> SessionOutcome {
        SessionOutcome {
            return_to_menu,
            score: self.state.score,
            highscore: self.state.highscore,
        }
    }
}

/// Run a play session until it exits to the menu or the host quits
pub fn start(config: GameConfig, ctx: SessionContext<'_>, options: SessionOptions) -> SessionOutcome {
    let SessionContext {
        renderer,
        assets,
        input,
        clock,
        audio,
        highscores,
        particles,
        transition,
    } = ctx;

    let config = config.sanitized();
    let seed = options.seed.unwrap_or_else(rand::random);
    let prefs = options.audio;
    log::info!(
        "Starting session (seed {seed}, music: {}, sfx: {}, entry fade: {})",
        prefs.music_enabled,
        prefs.sound_effects_enabled,
        !options.skip_entry_fade
    );

    let highscore = load_or_zero(highscores);
    let arena = build_arena(&config, assets);
    let audio = AudioManager::new(audio, prefs, &config);
    let state = GameState::new(config, arena, highscore, seed, options.skip_entry_fade);

    let mut session = Session {
        state,
        renderer,
        assets,
        audio,
        highscores,
        particles,
        transition,
        saved_highscore: highscore,
    };
    session.audio.start_music();

    let mut events = Vec::new();
    loop {
        let dt = clock.delta();

        events.clear();
        input.poll(&mut events);
        if events.contains(&InputEvent::QuitRequested) {
            log::info!("Quit requested, score {}", session.state.score);
            session.audio.stop_music();
            session.flush_highscore();
            return session.outcome(false);
        }

        let transition_finished =
            if matches!(session.state.phase, GamePhase::Exiting(ExitStage::Falling { .. })) {
                !session.transition.update(dt)
            } else {
                false
            };
        let tick_input = TickInput {
            pointer: events.iter().filter_map(InputEvent::pointer_event).collect(),
            transition_finished,
        };
        tick(&mut session.state, &tick_input, dt);

        let drained = session.state.drain_events();
        session.dispatch(drained);
        session.particles.update(dt);
        session.draw();
        clock.end_frame();

        if session.state.is_finished() {
            log::info!(
                "Session over: score {}, highscore {}",
                session.state.score,
                session.state.highscore
            );
            return session.outcome(true);
        }
    }
}
