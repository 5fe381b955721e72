//! Play-area layout the simulation runs inside
//!
//! Built once per session (see `renderer::layout`) from the config and the
//! sizes of whatever assets were available.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub screen: Rect,
    /// Decorative border; spawns happen just inside it when present
    pub border: Option<Rect>,
    pub heart_center: Vec2,
    pub heart: Rect,
    /// Base under the heart; replaces the heart as the collision target
    pub heart_base: Option<Rect>,
    pub exit_icon: Option<Rect>,
    pub spawn_padding: f32,
}

impl Arena {
    /// Bare arena: screen only, heart of `heart_size` centred at `heart_center`
    pub fn new(screen_size: Vec2, heart_center: Vec2, heart_size: Vec2, spawn_padding: f32) -> Self {
        Self {
            screen: Rect::new(Vec2::ZERO, screen_size),
            border: None,
            heart_center,
            heart: Rect::from_center(heart_center, heart_size),
            heart_base: None,
            exit_icon: None,
            spawn_padding,
        }
    }

    /// Padded rectangle pixels spawn on and splash positions are clamped to
    pub fn spawn_bounds(&self) -> Rect {
        self.border.unwrap_or(self.screen).inset(self.spawn_padding)
    }

    /// Region a pixel must touch to reach the heart
    pub fn collision_rect(&self) -> Rect {
        self.heart_base.unwrap_or(self.heart)
    }

    pub fn exit_icon_hit(&self, point: Vec2) -> bool {
        self.exit_icon.is_some_and(|r| r.contains_point(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Arena {
        Arena::new(
            Vec2::new(940.0, 605.0),
            Vec2::new(470.0, 302.0),
            Vec2::splat(10.0),
            20.0,
        )
    }

    #[test]
    fn test_spawn_bounds_fall_back_to_screen() {
        let a = arena();
        assert_eq!(a.spawn_bounds().min, Vec2::splat(20.0));
        assert_eq!(a.spawn_bounds().max, Vec2::new(920.0, 585.0));
    }

    #[test]
    fn test_spawn_bounds_prefer_border() {
        let mut a = arena();
        a.border = Some(Rect::from_center(a.heart_center, Vec2::new(600.0, 400.0)));
        let b = a.spawn_bounds();
        assert_eq!(b.left(), 170.0 + 20.0);
        assert_eq!(b.right(), 770.0 - 20.0);
    }

    #[test]
    fn test_collision_rect_prefers_base() {
        let mut a = arena();
        assert_eq!(a.collision_rect(), a.heart);
        let base = Rect::from_center(a.heart_center, Vec2::splat(80.0));
        a.heart_base = Some(base);
        assert_eq!(a.collision_rect(), base);
    }

    #[test]
    fn test_exit_icon_hit() {
        let mut a = arena();
        assert!(!a.exit_icon_hit(Vec2::new(470.0, 570.0)));
        a.exit_icon = Some(Rect::from_midbottom(Vec2::new(470.0, 575.0), Vec2::splat(32.0)));
        assert!(a.exit_icon_hit(Vec2::new(470.0, 570.0)));
        assert!(!a.exit_icon_hit(Vec2::new(100.0, 570.0)));
    }
}
