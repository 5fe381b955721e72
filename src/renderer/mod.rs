//! Backend-agnostic rendering
//!
//! The host supplies a `Renderer` for draw calls and an `AssetCatalog`
//! describing which sprites loaded. Anything missing is drawn as a solid
//! placeholder box of the expected size.

pub mod frame;
pub mod layout;

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{PixelKind, Rect};

/// RGBA, each channel in [0, 1]
pub type Color = [f32; 4];

pub mod colors {
    use super::Color;

    pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
    pub const GREEN: Color = [0.0, 1.0, 0.0, 1.0];
    pub const ORANGE: Color = [1.0, 0.65, 0.0, 1.0];
    pub const GREY: Color = [0.4, 0.4, 0.4, 1.0];
    pub const DARK_GREY: Color = [0.2, 0.2, 0.2, 1.0];
    pub const SCORE_TEXT: Color = WHITE;

    /// Same colour with its alpha multiplied by `opacity`
    pub fn with_opacity(color: Color, opacity: f32) -> Color {
        [color[0], color[1], color[2], color[3] * opacity.clamp(0.0, 1.0)]
    }
}

/// Exit icon variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitIconState {
    Normal,
    /// Darkened while the pointer is over it
    Hover,
    Pressed,
}

/// Every sprite the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Border,
    HeartBase,
    /// Damage tier 0 (intact) to 4
    Heart(u8),
    ExitIcon(ExitIconState),
    Pixel(PixelKind),
}

impl SpriteId {
    /// Solid colour drawn when the sprite is unavailable
    pub fn placeholder_color(&self) -> Color {
        match self {
            SpriteId::Border => colors::DARK_GREY,
            SpriteId::HeartBase => colors::GREY,
            SpriteId::Heart(_) => colors::RED,
            SpriteId::ExitIcon(_) => colors::WHITE,
            SpriteId::Pixel(kind) => pixel_color(*kind),
        }
    }
}

pub fn pixel_color(kind: PixelKind) -> Color {
    match kind {
        PixelKind::White => colors::WHITE,
        PixelKind::Red => colors::RED,
        PixelKind::Green => colors::GREEN,
        PixelKind::Orange => colors::ORANGE,
    }
}

/// Which sprites loaded, and at what native size
pub trait AssetCatalog {
    /// Unscaled size of `sprite`, or `None` if it failed to load
    fn sprite_size(&self, sprite: SpriteId) -> Option<Vec2>;
}

/// Catalog with nothing loaded: every sprite falls back to a placeholder
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetCatalog for NoAssets {
    fn sprite_size(&self, _sprite: SpriteId) -> Option<Vec2> {
        None
    }
}

/// Catalog backed by a size table
#[derive(Debug, Clone, Default)]
pub struct SizedAssets {
    pub sizes: HashMap<SpriteId, Vec2>,
}

impl SizedAssets {
    pub fn with(mut self, sprite: SpriteId, size: Vec2) -> Self {
        self.sizes.insert(sprite, size);
        self
    }
}

impl AssetCatalog for SizedAssets {
    fn sprite_size(&self, sprite: SpriteId) -> Option<Vec2> {
        self.sizes.get(&sprite).copied()
    }
}

/// Draw surface provided by the host
pub trait Renderer {
    fn clear(&mut self, color: Color);
    /// Draw a loaded sprite stretched over `dest`
    fn draw_sprite(&mut self, sprite: SpriteId, dest: Rect, opacity: f32);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Text anchored at its mid-top point
    fn draw_text(&mut self, text: &str, midtop: Vec2, color: Color);
    fn present(&mut self);
}

/// Renderer that draws nothing and only counts frames
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
}

impl Renderer for HeadlessRenderer {
    fn clear(&mut self, _color: Color) {}
    fn draw_sprite(&mut self, _sprite: SpriteId, _dest: Rect, _opacity: f32) {}
    fn fill_rect(&mut self, _rect: Rect, _color: Color) {}
    fn draw_text(&mut self, _text: &str, _midtop: Vec2, _color: Color) {}
    fn present(&mut self) {
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_colours_follow_pixel_kind() {
        assert_eq!(SpriteId::Pixel(PixelKind::Green).placeholder_color(), colors::GREEN);
        assert_eq!(SpriteId::Heart(3).placeholder_color(), colors::RED);
    }

    #[test]
    fn test_with_opacity_scales_alpha_only() {
        let c = colors::with_opacity(colors::ORANGE, 0.5);
        assert_eq!(&c[..3], &colors::ORANGE[..3]);
        assert_eq!(c[3], 0.5);
        assert_eq!(colors::with_opacity(colors::WHITE, 2.0)[3], 1.0);
    }

    #[test]
    fn test_sized_assets_lookup() {
        let assets = SizedAssets::default().with(SpriteId::Border, Vec2::new(300.0, 200.0));
        assert_eq!(assets.sprite_size(SpriteId::Border), Some(Vec2::new(300.0, 200.0)));
        assert_eq!(assets.sprite_size(SpriteId::HeartBase), None);
        assert_eq!(NoAssets.sprite_size(SpriteId::Border), None);
    }
}
