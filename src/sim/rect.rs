//! Axis-aligned rectangles for hit-testing and play-area bounds
//!
//! Screen space: x grows right, y grows down. A rect covers
//! `[left, right) x [top, bottom)`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() / 2.0;
        Self::new(center - half, center + half)
    }

    /// Rect whose bottom edge is centred on `anchor`
    pub fn from_midbottom(anchor: Vec2, size: Vec2) -> Self {
        let size = size.abs();
        Self::new(
            Vec2::new(anchor.x - size.x / 2.0, anchor.y - size.y),
            Vec2::new(anchor.x + size.x / 2.0, anchor.y),
        )
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Overlap test; rects that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Point test, inclusive on the top-left edges and exclusive on the bottom-right
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Shrink by `padding` on every side (never past the centre)
    pub fn inset(&self, padding: f32) -> Rect {
        let half = self.size() / 2.0;
        let pad = Vec2::splat(padding).min(half);
        Rect::new(self.min + pad, self.max - pad)
    }

    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_center() {
        let r = Rect::from_center(Vec2::new(100.0, 50.0), Vec2::new(20.0, 10.0));
        assert_eq!(r.left(), 90.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.top(), 45.0);
        assert_eq!(r.bottom(), 55.0);
        assert_eq!(r.center(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_rect_from_midbottom() {
        let r = Rect::from_midbottom(Vec2::new(470.0, 575.0), Vec2::new(40.0, 30.0));
        assert_eq!(r.bottom(), 575.0);
        assert_eq!(r.top(), 545.0);
        assert_eq!(r.center().x, 470.0);
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        assert!(!a.intersects(&b));

        let c = Rect::new(Vec2::new(9.5, 9.5), Vec2::splat(12.0));
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }

    #[test]
    fn test_contains_point_half_open() {
        let r = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        assert!(r.contains_point(Vec2::ZERO));
        assert!(r.contains_point(Vec2::new(9.9, 9.9)));
        assert!(!r.contains_point(Vec2::new(10.0, 5.0)));
        assert!(!r.contains_point(Vec2::new(5.0, -0.1)));
    }

    #[test]
    fn test_inset_and_clamp() {
        let r = Rect::new(Vec2::ZERO, Vec2::new(940.0, 605.0)).inset(20.0);
        assert_eq!(r.min, Vec2::splat(20.0));
        assert_eq!(r.max, Vec2::new(920.0, 585.0));
        assert_eq!(r.clamp_point(Vec2::new(-5.0, 1000.0)), Vec2::new(20.0, 585.0));

        // Over-padding collapses to the centre instead of inverting
        let tiny = Rect::new(Vec2::ZERO, Vec2::splat(10.0)).inset(50.0);
        assert_eq!(tiny.size(), Vec2::ZERO);
    }
}
