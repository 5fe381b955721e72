//! Heart collisions, deferred blink resolution and click dispatch
//!
//! Touching the heart never hurts it directly: white and orange pixels start
//! blinking and only damage the heart once the blink has finished and the
//! pixel is removed.

use glam::Vec2;

use super::pixel::{BlinkEffect, GamePixel, PixelKind, PixelState};
use super::spawner::spawn_splash_pair;
use super::state::{GameEvent, GameState, ParticleColor};
use crate::audio::SoundEffect;

impl GameState {
    /// Tick every pixel toward the heart and react to heart contact
    pub(crate) fn update_pixels(&mut self, dt: f32) {
        let target = self.arena.heart_center;
        let heart = self.arena.collision_rect();

        // Index loop: a green contact applies a powerup that touches other pixels
        for i in 0..self.pixels.len() {
            if !self.pixels[i].tick(dt, target, &self.config) {
                continue;
            }
            let pixel = &self.pixels[i];
            if pixel.is_blinking() || !pixel.collides_with(&heart) {
                continue;
            }
            self.on_heart_contact(i);
        }
    }

    fn on_heart_contact(&mut self, i: usize) {
        let kind = self.pixels[i].kind;
        match kind {
            PixelKind::Green if !self.config.deferred_green_powerup => {
                // Bursts immediately: no blink, no cue
                self.pixels[i].mark_dead();
                let pos = self.pixels[i].pos;
                self.apply_powerup();
                self.burst(pos, ParticleColor::Green, self.config.click_particles, 0.0);
            }
            PixelKind::Green => {
                self.pixels[i].begin_blink(BlinkEffect::ApplyPowerup, &self.config);
            }
            PixelKind::White | PixelKind::Orange => {
                self.pixels[i].begin_blink(BlinkEffect::DamageHeart, &self.config);
            }
            PixelKind::Red => {
                // Safe to let through, and worth points
                self.pixels[i].begin_blink(BlinkEffect::None, &self.config);
                self.add_score(self.config.red_points);
            }
        }
    }

    /// Drop dead pixels, resolving any blink that finished (or was cut short)
    pub(crate) fn remove_dead_pixels(&mut self) {
        if !self.pixels.iter().any(GamePixel::is_dead) {
            return;
        }
        let (dead, live): (Vec<GamePixel>, Vec<GamePixel>) =
            std::mem::take(&mut self.pixels)
                .into_iter()
                .partition(GamePixel::is_dead);
        self.pixels = live;

        for pixel in dead {
            if let PixelState::Dead {
                after_blink: Some(effect),
            } = pixel.state
            {
                self.resolve_blink(&pixel, effect);
            }
        }
    }

    fn resolve_blink(&mut self, pixel: &GamePixel, effect: BlinkEffect) {
        self.burst(
            pixel.pos,
            pixel.kind.into(),
            self.config.click_particles,
            0.0,
        );
        self.emit(GameEvent::Sound(SoundEffect::Explosion));

        match effect {
            BlinkEffect::None => {}
            BlinkEffect::DamageHeart => self.lose_life(),
            BlinkEffect::ApplyPowerup => {
                self.apply_powerup();
                self.emit(GameEvent::Sound(SoundEffect::Collect));
            }
        }
    }

    /// Index of the first live pixel under `point`
    pub fn pixel_at(&self, point: Vec2) -> Option<usize> {
        self.pixels
            .iter()
            .position(|p| !p.is_dead() && p.contains_point(point))
    }

    /// Resolve a click on the play area (the exit icon is handled before this)
    pub(crate) fn click_pixels(&mut self, point: Vec2) -> bool {
        let Some(i) = self.pixel_at(point) else {
            return false;
        };
        self.emit(GameEvent::Sound(SoundEffect::Explosion));

        let kind = self.pixels[i].kind;
        let pos = self.pixels[i].pos;
        let click_particles = self.config.click_particles;

        match kind {
            PixelKind::White => {
                self.pixels[i].mark_dead();
                self.burst(pos, ParticleColor::White, click_particles, 0.0);
                self.add_score(self.config.white_points);
            }
            PixelKind::Red => {
                self.shatter_heart();
                self.burst(pos, ParticleColor::Red, self.config.red_click_particles, 0.0);
                self.pixels[i].mark_dead();
                self.add_score(self.config.red_points);
                self.trigger_game_over(true);
            }
            PixelKind::Green => {
                let clicked_id = self.pixels[i].id;
                // The click collects the powerup; a blink in progress must not apply it again
                self.pixels[i].mark_collected();
                self.burst(pos, ParticleColor::Green, click_particles, 0.0);
                self.emit(GameEvent::Sound(SoundEffect::Collect));

                // Everything white or orange on the board goes, including
                // pixels the powerup itself just cleared
                let victims: Vec<usize> = self
                    .pixels
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| {
                        p.id != clicked_id
                            && !p.is_dead()
                            && matches!(p.kind, PixelKind::White | PixelKind::Orange)
                    })
                    .map(|(idx, _)| idx)
                    .collect();

                self.apply_powerup();

                for idx in victims {
                    let victim = &mut self.pixels[idx];
                    victim.mark_dead();
                    let (vpos, vkind) = (victim.pos, victim.kind);
                    self.burst(vpos, vkind.into(), click_particles, 0.0);
                    self.add_score(vkind.click_points(&self.config));
                }
            }
            PixelKind::Orange => {
                self.burst(pos, ParticleColor::Orange, click_particles, 0.0);
                self.spawn_splash(pos);
                self.pixels[i].mark_dead();
                self.add_score(self.config.orange_points);
            }
        }
        true
    }

    fn spawn_splash(&mut self, origin: Vec2) {
        let bounds = self.arena.spawn_bounds();
        let pair = spawn_splash_pair(
            &mut self.rng,
            origin,
            self.arena.heart_center,
            &bounds,
            self.base_speed,
            &self.config,
        );
        for pixel in pair {
            self.add_pixel(pixel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scoring::Powerup;
    use crate::sim::state::{GamePhase, test_state};

    fn add(state: &mut GameState, kind: PixelKind, pos: Vec2) -> u32 {
        state.add_pixel(GamePixel::new(0, pos, 0.0, kind, 10.0, 15.0))
    }

    fn bursts(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::ParticleBurst { .. }))
            .count()
    }

    fn count(events: &[GameEvent], wanted: &GameEvent) -> usize {
        events.iter().filter(|e| *e == wanted).count()
    }

    /// Run whole frames until `id` leaves the board, counting lives lost along the way
    fn run_until_removed(state: &mut GameState, id: u32, dt: f32) -> Vec<u8> {
        let mut lives_seen = Vec::new();
        for _ in 0..10_000 {
            state.update_pixels(dt);
            state.remove_dead_pixels();
            lives_seen.push(state.lives);
            if state.pixel(id).is_none() {
                return lives_seen;
            }
        }
        panic!("pixel {id} never removed");
    }

    #[test]
    fn test_white_contact_damages_only_after_blink() {
        let mut state = test_state(true);
        let heart = state.arena.heart_center;
        let id = add(&mut state, PixelKind::White, heart);

        state.update_pixels(0.01);
        state.remove_dead_pixels();
        assert!(state.pixel(id).is_some_and(|p| p.is_blinking()));
        assert_eq!(state.lives, 5);

        let lives_seen = run_until_removed(&mut state, id, 0.05);
        // Full lives on every frame but the last
        let (last, before) = lives_seen.split_last().unwrap();
        assert!(before.iter().all(|&l| l == 5));
        assert_eq!(*last, 4);

        let events = state.drain_events();
        assert_eq!(count(&events, &GameEvent::LifeLost { lives: 4 }), 1);
        assert_eq!(count(&events, &GameEvent::Sound(SoundEffect::Explosion)), 1);
    }

    #[test]
    fn test_red_contact_scores_without_damage() {
        let mut state = test_state(true);
        let heart = state.arena.heart_center;
        let id = add(&mut state, PixelKind::Red, heart);

        state.update_pixels(0.01);
        assert_eq!(state.score, 5);
        assert_eq!(state.lives, 5);
        let pixel = state.pixel(id).unwrap();
        assert!(matches!(
            pixel.state,
            PixelState::Blinking(b) if b.effect == BlinkEffect::None
        ));

        // A blinking pixel is not scored again on later contact checks
        state.update_pixels(0.01);
        assert_eq!(state.score, 5);

        run_until_removed(&mut state, id, 0.05);
        assert_eq!(state.lives, 5);
        assert_eq!(state.score, 5);
    }

    #[test]
    fn test_green_contact_resolves_immediately() {
        let mut state = test_state(true);
        let heart = state.arena.heart_center;
        let id = add(&mut state, PixelKind::Green, heart);

        state.update_pixels(0.01);
        state.remove_dead_pixels();
        assert!(state.pixel(id).is_none());

        let events = state.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::PowerupApplied(_)))
                .count(),
            1
        );
        assert_eq!(bursts(&events), 1);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Sound(_))));
    }

    #[test]
    fn test_deferred_green_powerup_waits_for_blink() {
        let mut state = test_state(true);
        state.config.deferred_green_powerup = true;
        let heart = state.arena.heart_center;
        let id = add(&mut state, PixelKind::Green, heart);

        state.update_pixels(0.01);
        assert!(state.pixel(id).is_some_and(|p| p.is_blinking()));
        assert!(state.drain_events().is_empty());

        run_until_removed(&mut state, id, 0.05);
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::PowerupApplied(_))));
        assert_eq!(count(&events, &GameEvent::Sound(SoundEffect::Collect)), 1);
    }

    #[test]
    fn test_clicking_blinking_green_applies_one_powerup() {
        let mut state = test_state(true);
        state.config.deferred_green_powerup = true;
        let heart = state.arena.heart_center;
        let id = add(&mut state, PixelKind::Green, heart);

        state.update_pixels(0.01);
        assert!(state.pixel(id).is_some_and(|p| p.is_blinking()));

        assert!(state.click_pixels(heart));
        state.update_pixels(0.01);
        state.remove_dead_pixels();
        assert!(state.pixel(id).is_none());

        let events = state.drain_events();
        let powerups = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PowerupApplied(_)))
            .count();
        assert_eq!(powerups, 1);
        assert_eq!(count(&events, &GameEvent::Sound(SoundEffect::Collect)), 1);
        // Removal of a collected pixel is silent
        assert_eq!(count(&events, &GameEvent::Sound(SoundEffect::Explosion)), 1);
    }

    #[test]
    fn test_far_pixels_do_not_collide() {
        let mut state = test_state(true);
        let id = add(&mut state, PixelKind::White, Vec2::new(30.0, 30.0));
        state.update_pixels(0.1);
        assert!(state.pixel(id).is_some_and(|p| !p.is_blinking()));
    }

    #[test]
    fn test_click_white() {
        let mut state = test_state(true);
        let pos = Vec2::new(200.0, 200.0);
        let id = add(&mut state, PixelKind::White, pos);
        assert!(state.click_pixels(pos));
        assert!(state.pixel(id).is_some_and(|p| p.is_dead()));
        assert_eq!(state.score, 1);

        // Already dead: nothing left to hit
        assert!(!state.click_pixels(pos));
        assert_eq!(state.score, 1);

        state.remove_dead_pixels();
        assert!(state.pixels.is_empty());
    }

    #[test]
    fn test_click_miss() {
        let mut state = test_state(true);
        add(&mut state, PixelKind::White, Vec2::new(200.0, 200.0));
        assert!(!state.click_pixels(Vec2::new(400.0, 400.0)));
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_click_hits_first_match() {
        let mut state = test_state(true);
        let pos = Vec2::new(200.0, 200.0);
        let first = add(&mut state, PixelKind::White, pos);
        let second = add(&mut state, PixelKind::Red, pos);
        state.click_pixels(pos);
        assert!(state.pixel(first).is_some_and(|p| p.is_dead()));
        assert!(state.pixel(second).is_some_and(|p| !p.is_dead()));
    }

    #[test]
    fn test_click_red_ends_game() {
        let mut state = test_state(true);
        let pos = Vec2::new(200.0, 200.0);
        add(&mut state, PixelKind::Red, pos);
        state.click_pixels(pos);

        assert_eq!(state.lives, 0);
        assert_eq!(state.heart_tier, 4);
        assert_eq!(state.score, 5);
        assert_eq!(
            state.phase,
            GamePhase::GameOverPending {
                elapsed: 0.0,
                from_red: true
            }
        );
        assert!(state.pending_events().contains(&GameEvent::ParticleBurst {
            pos,
            color: ParticleColor::Red,
            count: 20,
            spread: 0.0,
        }));
    }

    #[test]
    fn test_click_orange_spawns_pair() {
        let mut state = test_state(true);
        state.arena.heart_center = Vec2::new(50.0, 50.0);
        state.base_speed = 20.0;
        let click = Vec2::new(100.0, 100.0);
        let id = add(&mut state, PixelKind::Orange, click);

        state.click_pixels(click);
        assert_eq!(state.score, 3);
        assert!(state.pixel(id).is_some_and(|p| p.is_dead()));

        let spawned: Vec<_> = state.pixels.iter().filter(|p| p.id != id).collect();
        assert_eq!(spawned.len(), 2);
        let origin_dist = click.distance(Vec2::new(50.0, 50.0));
        for p in spawned {
            assert_eq!(p.kind, PixelKind::White);
            assert!((p.speed - 0.6 * 20.0).abs() < 1e-5);
            assert!(p.pos.distance(Vec2::new(50.0, 50.0)) > origin_dist);
        }
    }

    #[test]
    fn test_click_green_clears_board() {
        for seed in 0..12 {
            let mut state = test_state(true);
            state.rng = rand::SeedableRng::seed_from_u64(seed);
            let click = Vec2::new(200.0, 200.0);
            let green = add(&mut state, PixelKind::Green, click);
            for i in 0..3 {
                add(&mut state, PixelKind::White, Vec2::new(400.0 + 30.0 * i as f32, 100.0));
            }
            for i in 0..2 {
                add(&mut state, PixelKind::Orange, Vec2::new(400.0 + 30.0 * i as f32, 500.0));
            }
            let red = add(&mut state, PixelKind::Red, Vec2::new(800.0, 300.0));

            state.click_pixels(click);

            assert!(state.pixel(green).is_some_and(|p| p.is_dead()));
            assert!(state.pixel(red).is_some_and(|p| !p.is_dead()));
            let dead = state.pixels.iter().filter(|p| p.is_dead()).count();
            assert_eq!(dead, 6);
            // 3 whites at 1 point, 2 oranges at 3 points
            assert_eq!(state.score, 9);

            let events = state.drain_events();
            assert_eq!(bursts(&events), 6, "seed {seed}");
            let powerups: Vec<_> = events
                .iter()
                .filter_map(|e| match e {
                    GameEvent::PowerupApplied(p) => Some(*p),
                    _ => None,
                })
                .collect();
            assert_eq!(powerups.len(), 1);
            assert!(Powerup::ALL.contains(&powerups[0]));
        }
    }

    #[test]
    fn test_killing_a_blinking_pixel_still_resolves_damage() {
        let mut state = test_state(true);
        let heart = state.arena.heart_center;
        let id = add(&mut state, PixelKind::White, heart);
        state.update_pixels(0.01);
        assert!(state.pixel(id).is_some_and(|p| p.is_blinking()));

        state.click_pixels(heart);
        state.update_pixels(0.01);
        state.remove_dead_pixels();
        assert!(state.pixel(id).is_none());
        assert_eq!(state.lives, 4);
        assert_eq!(state.score, 1);
    }
}
