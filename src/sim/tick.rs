//! Per-frame simulation step
//!
//! Order within a frame: pointer input, exit/phase timers, difficulty ramp,
//! spawn check, per-pixel tick with heart collisions, removal of dead pixels.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::spawner::{base_speed_at, spawn_interval_at, spawn_one};
use super::state::{ExitStage, GameEvent, GamePhase, GameState};
use crate::audio::SoundEffect;

/// Pointer activity for one frame, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Moved(Vec2),
    Pressed(Vec2),
    Released(Vec2),
}

/// Inputs for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub pointer: Vec<PointerEvent>,
    /// The external fall-off transition reported completion this frame
    pub transition_finished: bool,
}

/// Advance the session by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase.is_interactive() {
        for event in &input.pointer {
            handle_pointer(state, *event);
        }
    }

    match state.phase {
        GamePhase::Finished => return,
        GamePhase::Exiting(stage) => {
            advance_exit(state, stage, input.transition_finished, dt);
            return;
        }
        GamePhase::EnteringFade { elapsed } => {
            let elapsed = elapsed + dt;
            state.phase = if elapsed >= state.config.entry_fade_duration {
                GamePhase::Playing
            } else {
                GamePhase::EnteringFade { elapsed }
            };
        }
        GamePhase::GameOverPending { elapsed, from_red } => {
            let elapsed = elapsed + dt;
            if elapsed >= state.config.game_over_delay {
                state.start_exit();
                return;
            }
            state.phase = GamePhase::GameOverPending { elapsed, from_red };
        }
        GamePhase::Playing => {}
    }

    // Difficulty ramp
    state.difficulty_time += dt;
    state.spawn_interval = spawn_interval_at(state.difficulty_time, &state.config);
    state.base_speed = base_speed_at(state.difficulty_time, &state.config);

    if state
        .spawner
        .should_spawn(dt, state.difficulty_time, &state.config)
    {
        let bounds = state.arena.spawn_bounds();
        let pixel = spawn_one(&mut state.rng, &bounds, state.base_speed, &state.config);
        let kind = pixel.kind;
        let id = state.add_pixel(pixel);
        log::trace!("Spawned {} pixel {id}", kind.as_str());
    }

    state.update_pixels(dt);
    state.remove_dead_pixels();
}

fn handle_pointer(state: &mut GameState, event: PointerEvent) {
    match event {
        PointerEvent::Moved(pos) => {
            state.pointer = pos;
            state.exit_button.hovered = state.arena.exit_icon_hit(pos);
        }
        PointerEvent::Pressed(pos) => {
            state.pointer = pos;
            // Exit icon wins over any pixel underneath it
            if state.arena.exit_icon_hit(pos) {
                state.exit_button.pressed = true;
                state.emit(GameEvent::Sound(SoundEffect::Explosion));
            } else {
                state.click_pixels(pos);
            }
        }
        PointerEvent::Released(pos) => {
            state.pointer = pos;
            let armed = std::mem::take(&mut state.exit_button.pressed);
            if armed && state.arena.exit_icon_hit(pos) {
                log::info!("Exit icon clicked");
                state.start_exit();
            }
        }
    }
}

fn advance_exit(state: &mut GameState, stage: ExitStage, transition_finished: bool, dt: f32) {
    match stage {
        ExitStage::Falling { elapsed } => {
            let elapsed = elapsed + dt;
            state.phase = if transition_finished || elapsed >= state.config.exit_transition_duration {
                GamePhase::Exiting(ExitStage::Flash { elapsed: 0.0 })
            } else {
                GamePhase::Exiting(ExitStage::Falling { elapsed })
            };
        }
        ExitStage::Flash { elapsed } => {
            let elapsed = elapsed + dt;
            if elapsed >= state.config.exit_flash_duration {
                state.phase = GamePhase::Finished;
                state.emit(GameEvent::Finished);
            } else {
                state.phase = GamePhase::Exiting(ExitStage::Flash { elapsed });
            }
        }
    }
}

impl GameState {
    /// Leave for the menu. No-op once the exit has started.
    pub fn start_exit(&mut self) {
        if matches!(self.phase, GamePhase::Exiting(_) | GamePhase::Finished) {
            return;
        }
        self.phase = GamePhase::Exiting(ExitStage::Falling { elapsed: 0.0 });
        self.exit_button = Default::default();
        self.emit(GameEvent::ExitStarted);
    }
}
