//! 2:1 isometric projection between world space and screen space.
//!
//! World space is planar (`x`, `y`) plus elevation `h` (`Vec3::z`).
//! Screen space is pixels with Y pointing down. Everything stays in `f32`;
//! only the painter truncates to whole pixels.

use glam::{Vec2, Vec3};

/// Size of a tile edge in world units.
pub const TILE_SIZE: f32 = 64.0;
/// Elevation of one terrain step in world units.
pub const TILE_HEIGHT: f32 = 32.0;

/// Project the anchor point of a world position (no sprite footprint).
#[inline]
pub fn anchor_to_screen(world: Vec3) -> Vec2 {
    Vec2::new(world.x - world.y, (world.x + world.y) / 2.0 - world.z)
}

/// Project a world position to the top-left corner of a sprite standing on it.
///
/// The sprite is centered horizontally on the anchor and rests its bottom edge
/// on it: `sx = (x - y) - w/2`, `sy = (x + y)/2 - h_sprite - h`.
#[inline]
pub fn to_screen(world: Vec3, footprint: Vec2) -> Vec2 {
    anchor_to_screen(world) - Vec2::new(footprint.x / 2.0, footprint.y)
}

/// Inverse of [`anchor_to_screen`] for a known elevation `h`.
#[inline]
pub fn to_world(screen: Vec2, h: f32) -> Vec2 {
    let lifted = screen.y + h;
    Vec2::new(screen.x / 2.0 + lifted, lifted - screen.x / 2.0)
}

/// Top-left corner of a tile sprite. Tile sprites hang from the tile's
/// north corner rather than standing on their anchor.
#[inline]
pub fn tile_to_screen(grid_x: u32, grid_y: u32, elevation: f32, sprite_width: f32) -> Vec2 {
    let gx = grid_x as f32;
    let gy = grid_y as f32;
    Vec2::new(
        (gx - gy) * TILE_SIZE - sprite_width / 2.0,
        (gx + gy) * TILE_SIZE / 2.0 - elevation,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projects_with_footprint() {
        let p = to_screen(Vec3::new(100.0, 40.0, 10.0), Vec2::new(32.0, 48.0));
        assert!((p.x - (60.0 - 16.0)).abs() < 1e-5);
        assert!((p.y - (70.0 - 48.0 - 10.0)).abs() < 1e-5);
    }

    #[test]
    fn inverse_round_trips_at_same_elevation() {
        let samples = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(123.25, 7.5, 0.0),
            Vec3::new(640.0, 1280.0, 96.0),
            Vec3::new(3.1, 999.9, 47.3),
            Vec3::new(-20.0, 15.0, 32.0),
        ];
        for world in samples {
            let screen = anchor_to_screen(world);
            let back = to_world(screen, world.z);
            assert!((back.x - world.x).abs() < 1e-3, "{world:?} -> {back:?}");
            assert!((back.y - world.y).abs() < 1e-3, "{world:?} -> {back:?}");
        }
    }

    #[test]
    fn tile_anchor_matches_entity_projection() {
        // The north corner of tile (3, 2) is world (192, 128).
        let corner = anchor_to_screen(Vec3::new(3.0 * TILE_SIZE, 2.0 * TILE_SIZE, 64.0));
        let tile = tile_to_screen(3, 2, 64.0, 128.0);
        assert!((tile.x - (corner.x - 64.0)).abs() < 1e-5);
        assert!((tile.y - corner.y).abs() < 1e-5);
    }
}
