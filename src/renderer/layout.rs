//! Session layout from config and loaded asset sizes

use glam::Vec2;

use super::{AssetCatalog, ExitIconState, SpriteId};
use crate::settings::GameConfig;
use crate::sim::{Arena, Rect};

/// Unscaled edge length of the heart placeholder box
pub const HEART_PLACEHOLDER_SIZE: f32 = 100.0;

/// Build the play area. Missing sprites degrade: no border means the screen
/// bounds spawns, no base means the heart is the collision target, no exit
/// icon means no exit button.
pub fn build_arena(config: &GameConfig, assets: &dyn AssetCatalog) -> Arena {
    let screen = Vec2::new(config.screen_width, config.screen_height);

    let heart_size = match assets.sprite_size(SpriteId::Heart(0)) {
        Some(size) => size * config.heart_scale,
        None => {
            log::warn!("Heart sprite missing, using placeholder");
            Vec2::splat(HEART_PLACEHOLDER_SIZE * config.heart_scale)
        }
    };
    let mut arena = Arena::new(screen, config.heart_position, heart_size, config.spawn_padding);

    arena.border = assets
        .sprite_size(SpriteId::Border)
        .map(|size| Rect::from_center(config.border_position, size * config.border_scale));
    if arena.border.is_none() {
        log::warn!("Border sprite missing, spawning along the screen edge");
    }

    arena.heart_base = assets
        .sprite_size(SpriteId::HeartBase)
        .map(|size| Rect::from_center(config.heart_position, size * config.heart_base_scale));
    if arena.heart_base.is_none() {
        log::warn!("Heart base sprite missing, colliding with the heart itself");
    }

    arena.exit_icon = assets
        .sprite_size(SpriteId::ExitIcon(ExitIconState::Normal))
        .map(|size| Rect::from_midbottom(config.exit_icon_position, size * config.exit_icon_scale));
    if arena.exit_icon.is_none() {
        log::warn!("Exit icon missing, no exit button this session");
    }

    arena
}
