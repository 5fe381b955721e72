//! Draw order for one frame
//!
//! Border first, then pixels, heart base, heart, exit icon and score. The
//! particle and exit-transition collaborators draw between the scene and the
//! white overlays.

use glam::Vec2;

use super::{AssetCatalog, Color, ExitIconState, Renderer, SpriteId, colors};
use crate::consts::OPAQUE;
use crate::sim::{GamePhase, GameState, Rect};

/// Score text anchor, mid-top
const SCORE_MARGIN: f32 = 10.0;
/// Alpha of the darkening laid over the exit icon on hover when no hover sprite loaded
const HOVER_DARKNESS: f32 = 50.0 / 255.0;

/// A sprite handed to the exit transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneElement {
    pub sprite: SpriteId,
    pub rect: Rect,
}

fn draw_sprite_or_placeholder(
    renderer: &mut dyn Renderer,
    assets: &dyn AssetCatalog,
    sprite: SpriteId,
    dest: Rect,
    opacity: f32,
) {
    if assets.sprite_size(sprite).is_some() {
        renderer.draw_sprite(sprite, dest, opacity);
    } else {
        renderer.fill_rect(dest, colors::with_opacity(sprite.placeholder_color(), opacity));
    }
}

/// Most damaged heart image at or below `tier` that actually loaded
fn heart_sprite(assets: &dyn AssetCatalog, tier: u8) -> SpriteId {
    (0..=tier)
        .rev()
        .map(SpriteId::Heart)
        .find(|s| assets.sprite_size(*s).is_some())
        .unwrap_or(SpriteId::Heart(tier))
}

fn exit_icon_state(state: &GameState) -> ExitIconState {
    if state.exit_button.pressed {
        ExitIconState::Pressed
    } else if state.exit_button.hovered {
        ExitIconState::Hover
    } else {
        ExitIconState::Normal
    }
}

/// Sprites that fall off screen when the session exits (the border stays)
pub fn scene_elements(state: &GameState, assets: &dyn AssetCatalog) -> Vec<SceneElement> {
    let arena = &state.arena;
    let mut elements = Vec::with_capacity(state.pixels.len() + 3);

    if let Some(rect) = arena.heart_base {
        elements.push(SceneElement {
            sprite: SpriteId::HeartBase,
            rect,
        });
    }
    elements.push(SceneElement {
        sprite: heart_sprite(assets, state.heart_tier),
        rect: arena.heart,
    });
    if let Some(rect) = arena.exit_icon {
        elements.push(SceneElement {
            sprite: SpriteId::ExitIcon(ExitIconState::Normal),
            rect,
        });
    }
    elements.extend(state.pixels.iter().filter(|p| !p.is_dead()).map(|p| SceneElement {
        sprite: SpriteId::Pixel(p.kind),
        rect: p.rect(),
    }));
    elements
}

/// Background and, outside the exit sequence, every gameplay sprite
pub fn draw_scene(renderer: &mut dyn Renderer, assets: &dyn AssetCatalog, state: &GameState) {
    renderer.clear(colors::BLACK);

    let arena = &state.arena;
    if let Some(border) = arena.border {
        draw_sprite_or_placeholder(renderer, assets, SpriteId::Border, border, 1.0);
    }

    if matches!(state.phase, GamePhase::Exiting(_) | GamePhase::Finished) {
        return;
    }

    for pixel in &state.pixels {
        let alpha = pixel.draw_alpha();
        if alpha == 0 {
            continue;
        }
        let opacity = f32::from(alpha) / f32::from(OPAQUE);
        draw_sprite_or_placeholder(renderer, assets, SpriteId::Pixel(pixel.kind), pixel.rect(), opacity);
    }

    if let Some(base) = arena.heart_base {
        draw_sprite_or_placeholder(renderer, assets, SpriteId::HeartBase, base, 1.0);
    }

    let heart = heart_sprite(assets, state.heart_tier);
    draw_sprite_or_placeholder(renderer, assets, heart, arena.heart, 1.0);

    if let Some(icon) = arena.exit_icon {
        let wanted = SpriteId::ExitIcon(exit_icon_state(state));
        let normal = SpriteId::ExitIcon(ExitIconState::Normal);
        if assets.sprite_size(wanted).is_some() || assets.sprite_size(normal).is_none() {
            draw_sprite_or_placeholder(renderer, assets, wanted, icon, 1.0);
        } else {
            draw_sprite_or_placeholder(renderer, assets, normal, icon, 1.0);
            if state.exit_button.hovered || state.exit_button.pressed {
                renderer.fill_rect(icon, colors::with_opacity(colors::BLACK, HOVER_DARKNESS));
            }
        }
    }

    let anchor = Vec2::new(arena.screen.center().x, arena.screen.top() + SCORE_MARGIN);
    renderer.draw_text(&format!("Score: {}", state.score), anchor, colors::SCORE_TEXT);
}

/// White entry fade and exit flash, drawn last
pub fn draw_overlays(renderer: &mut dyn Renderer, state: &GameState) {
    let alpha = state.entry_fade_alpha().max(state.exit_flash_alpha());
    if alpha > 0.0 {
        let overlay: Color = colors::with_opacity(colors::WHITE, alpha);
        renderer.fill_rect(state.arena.screen, overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{NoAssets, SizedAssets};
    use crate::sim::state::test_state;
    use crate::sim::{ExitStage, GamePixel, PixelKind};

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear,
        Sprite(SpriteId, f32),
        Fill(Rect, Color),
        Text(String),
        Present,
    }

    #[derive(Default)]
    struct RecordingRenderer {
        calls: Vec<Call>,
    }

    impl Renderer for RecordingRenderer {
        fn clear(&mut self, _color: Color) {
            self.calls.push(Call::Clear);
        }
        fn draw_sprite(&mut self, sprite: SpriteId, _dest: Rect, opacity: f32) {
            self.calls.push(Call::Sprite(sprite, opacity));
        }
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.calls.push(Call::Fill(rect, color));
        }
        fn draw_text(&mut self, text: &str, _midtop: Vec2, _color: Color) {
            self.calls.push(Call::Text(text.to_string()));
        }
        fn present(&mut self) {
            self.calls.push(Call::Present);
        }
    }

    #[test]
    fn test_placeholders_drawn_without_assets() {
        let mut state = test_state(true);
        state.score = 7;
        let mut pixel = GamePixel::new(0, Vec2::new(50.0, 50.0), 0.0, PixelKind::Green, 10.0, 15.0);
        pixel.alpha = 255;
        state.add_pixel(pixel);

        let mut r = RecordingRenderer::default();
        draw_scene(&mut r, &NoAssets, &state);

        assert_eq!(r.calls[0], Call::Clear);
        assert_eq!(r.calls[1], Call::Fill(state.pixels[0].rect(), colors::GREEN));
        assert_eq!(r.calls[2], Call::Fill(state.arena.heart, colors::RED));
        assert_eq!(r.calls[3], Call::Text("Score: 7".to_string()));
        assert_eq!(r.calls.len(), 4);
    }

    #[test]
    fn test_invisible_pixels_skipped() {
        let mut state = test_state(true);
        state.add_pixel(GamePixel::new(0, Vec2::new(50.0, 50.0), 0.0, PixelKind::White, 10.0, 15.0));
        let mut r = RecordingRenderer::default();
        draw_scene(&mut r, &NoAssets, &state);
        assert!(!r.calls.iter().any(|c| matches!(c, Call::Fill(_, color) if *color == colors::WHITE)));
    }

    #[test]
    fn test_heart_falls_back_to_lower_tier() {
        let assets = SizedAssets::default()
            .with(SpriteId::Heart(0), Vec2::splat(100.0))
            .with(SpriteId::Heart(1), Vec2::splat(100.0));
        assert_eq!(heart_sprite(&assets, 3), SpriteId::Heart(1));
        assert_eq!(heart_sprite(&assets, 0), SpriteId::Heart(0));
        assert_eq!(heart_sprite(&NoAssets, 2), SpriteId::Heart(2));
    }

    #[test]
    fn test_hover_darkens_normal_icon() {
        let mut state = test_state(true);
        let icon = Rect::from_midbottom(Vec2::new(470.0, 575.0), Vec2::splat(32.0));
        state.arena.exit_icon = Some(icon);
        state.exit_button.hovered = true;
        let assets =
            SizedAssets::default().with(SpriteId::ExitIcon(ExitIconState::Normal), Vec2::splat(256.0));

        let mut r = RecordingRenderer::default();
        draw_scene(&mut r, &assets, &state);
        assert!(r.calls.contains(&Call::Sprite(SpriteId::ExitIcon(ExitIconState::Normal), 1.0)));
        assert!(r.calls.contains(&Call::Fill(icon, colors::with_opacity(colors::BLACK, HOVER_DARKNESS))));
    }

    #[test]
    fn test_exiting_draws_only_background() {
        let mut state = test_state(true);
        state.phase = GamePhase::Exiting(ExitStage::Flash { elapsed: 0.5 });
        let mut r = RecordingRenderer::default();
        draw_scene(&mut r, &NoAssets, &state);
        assert_eq!(r.calls, vec![Call::Clear]);

        draw_overlays(&mut r, &state);
        assert_eq!(
            r.calls[1],
            Call::Fill(state.arena.screen, colors::with_opacity(colors::WHITE, 0.5))
        );
    }

    #[test]
    fn test_scene_elements_skip_border_and_dead_pixels() {
        let mut state = test_state(true);
        state.arena.border = Some(state.arena.screen);
        let live = GamePixel::new(0, Vec2::new(50.0, 50.0), 0.0, PixelKind::Orange, 10.0, 15.0);
        let mut dead = live.clone();
        dead.mark_dead();
        state.add_pixel(live);
        state.add_pixel(dead);

        let elements = scene_elements(&state, &NoAssets);
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].sprite, SpriteId::Heart(0));
        assert_eq!(elements[1].sprite, SpriteId::Pixel(PixelKind::Orange));
    }
}
