//! Raw input events from the host

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::PointerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerMoved(Vec2),
    /// Primary button pressed at a screen position
    ButtonDown(Vec2),
    ButtonUp(Vec2),
    /// Window closed or the host asked the session to stop
    QuitRequested,
}

impl InputEvent {
    /// Pointer part of the event, if any
    pub fn pointer_event(&self) -> Option<PointerEvent> {
        match *self {
            InputEvent::PointerMoved(p) => Some(PointerEvent::Moved(p)),
            InputEvent::ButtonDown(p) => Some(PointerEvent::Pressed(p)),
            InputEvent::ButtonUp(p) => Some(PointerEvent::Released(p)),
            InputEvent::QuitRequested => None,
        }
    }
}

/// Anything that can produce this frame's input events
pub trait InputSource {
    /// Append events that arrived since the last poll
    fn poll(&mut self, out: &mut Vec<InputEvent>);
}

/// Replays a fixed list of frames, one per poll, then stays quiet
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Queue `count` frames with no input
    pub fn idle(mut self, count: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(Vec::new(), count));
        self
    }

    /// Queue a press and release at `pos` in one frame
    pub fn click(mut self, pos: Vec2) -> Self {
        self.frames.push_back(vec![
            InputEvent::PointerMoved(pos),
            InputEvent::ButtonDown(pos),
            InputEvent::ButtonUp(pos),
        ]);
        self
    }

    pub fn quit(mut self) -> Self {
        self.frames.push_back(vec![InputEvent::QuitRequested]);
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, out: &mut Vec<InputEvent>) {
        if let Some(frame) = self.frames.pop_front() {
            out.extend(frame);
        }
    }
}
