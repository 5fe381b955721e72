//! Frame timing

use std::thread;
use std::time::{Duration, Instant};

use crate::consts::MAX_FRAME_DT;

/// Source of per-frame time steps
pub trait Clock {
    /// Seconds since the previous frame, clamped to `MAX_FRAME_DT`
    fn delta(&mut self) -> f32;
    /// Called after presenting; may sleep to hold the frame rate
    fn end_frame(&mut self) {}
}

/// Same step every frame (tests, headless runs)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub dt: f32,
}

impl FixedClock {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }
}

impl Clock for FixedClock {
    fn delta(&mut self) -> f32 {
        self.dt.min(MAX_FRAME_DT)
    }
}

/// Wall-clock timing capped to a target FPS
#[derive(Debug, Clone)]
pub struct RealtimeClock {
    frame_target: Option<Duration>,
    last_frame: Instant,
    frame_start: Instant,
}

impl RealtimeClock {
    /// `fps` of 0 leaves the frame rate uncapped
    pub fn new(fps: u32) -> Self {
        let now = Instant::now();
        Self {
            frame_target: target_frame_duration(fps),
            last_frame: now,
            frame_start: now,
        }
    }
}

impl Clock for RealtimeClock {
    fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_start = now;
        dt.min(MAX_FRAME_DT)
    }

    fn end_frame(&mut self) {
        let elapsed = Instant::now().saturating_duration_since(self.frame_start);
        let sleep = compute_cap_sleep(elapsed, self.frame_target);
        if sleep > Duration::ZERO {
            thread::sleep(sleep);
        }
    }
}

fn target_frame_duration(fps: u32) -> Option<Duration> {
    (fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(fps)))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}
