//! Builds the back-to-front draw list for one frame.
//!
//! Terrain and entities are dropped into depth buckets keyed by their coarse
//! grid cell and elevation, then drained in ascending key order. Insertion
//! order inside a bucket is kept, so the pass order (terrain first, then each
//! entity group) breaks ties.

use glam::{Vec2, Vec3};

use crate::assets::registry::AssetRegistry;
use crate::components::entity::{depth_key_at, Entity};
use crate::components::group::EntityGroup;
use crate::components::sprite::Sprite;
use crate::components::tilemap::{TerrainGrid, Tile};
use crate::config::EngineConfig;
use crate::core::projection::{self, TILE_HEIGHT, TILE_SIZE};
use crate::core::scene::Scene;
use crate::renderer::camera::Camera;
use crate::renderer::draw::{DepthBuckets, DrawCommand, DrawList};

/// Screen rows (`gx + gy`) and screen columns (`gx - gy`) of the tiles that
/// can reach the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileWindow {
    pub first_row: i64,
    pub last_row: i64,
    pub first_col: i64,
    pub last_col: i64,
}

impl TileWindow {
    /// A tile's north corner projects to `((gx - gy) * TS, (gx + gy) * TS/2)`,
    /// so each viewport edge bounds one of the two sums directly. Raised tiles
    /// reach up by their elevation; everything reaches down by one diamond.
    pub fn new(camera: &Camera, max_elevation: f32, margin_tiles: u32) -> Self {
        let m = margin_tiles as i64;
        let half = TILE_SIZE / 2.0;
        let top = camera.offset.y;
        let bottom = camera.offset.y + camera.viewport.y + max_elevation;
        let left = camera.offset.x;
        let right = camera.offset.x + camera.viewport.x;
        Self {
            first_row: ((top - TILE_SIZE) / half).floor() as i64 - m,
            last_row: (bottom / half).ceil() as i64 + m,
            first_col: (left / TILE_SIZE).floor() as i64 - 1 - m,
            last_col: (right / TILE_SIZE).ceil() as i64 + 1 + m,
        }
    }

    /// Visible cells of a `width x height` grid, row by row.
    pub fn cells(self, width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
        let w = width as i64;
        let h = height as i64;
        let last_row = self.last_row.min(w + h - 2);
        (self.first_row.max(0)..=last_row).flat_map(move |r| {
            // gx - gy = 2gx - r must stay inside the column window.
            let lo = (r - (h - 1))
                .max(0)
                .max((r + self.first_col + 1).div_euclid(2));
            let hi = r.min(w - 1).min((r + self.last_col).div_euclid(2));
            (lo..=hi).map(move |gx| (gx as u32, (r - gx) as u32))
        })
    }
}

/// Rebuild `out` for the current frame.
///
/// Same inputs, same list: iteration follows grid rows and scene slots, and
/// the buckets keep insertion order.
pub fn build_draw_list(
    terrain: &TerrainGrid,
    scene: &Scene,
    camera: &Camera,
    registry: &AssetRegistry,
    config: &EngineConfig,
    out: &mut DrawList,
) {
    out.clear();
    let mut buckets = DepthBuckets::new();

    let window = TileWindow::new(camera, terrain.max_elevation(), config.cull_margin_tiles);
    let column = registry.column_sprite();
    for (gx, gy) in window.cells(terrain.width(), terrain.height()) {
        if let Some(tile) = terrain.get(gx, gy) {
            push_tile(&mut buckets, tile, registry, column, camera.offset);
        }
    }

    for group in EntityGroup::ALL {
        for (_, entity) in scene.group(group) {
            push_entity(&mut buckets, entity, terrain, camera, config.entity_cull_margin);
        }
    }

    buckets.drain_into(out);
    log::trace!("draw list: {} commands", out.len());
}

fn push_tile(
    buckets: &mut DepthBuckets,
    tile: &Tile,
    registry: &AssetRegistry,
    column: Option<Sprite>,
    offset: Vec2,
) {
    let key = tile.depth_key();
    if let Some(column) = column {
        for k in 0..tile.levels() {
            let elevation = k as f32 * TILE_HEIGHT;
            buckets.insert(key, tile_command(tile, column, elevation, offset));
        }
    }
    if let Some(sprite) = registry.tile_sprite(tile.shape) {
        buckets.insert(key, tile_command(tile, sprite, tile.base_elevation, offset));
    }
}

fn tile_command(tile: &Tile, sprite: Sprite, elevation: f32, offset: Vec2) -> DrawCommand {
    let p = projection::tile_to_screen(tile.grid_x, tile.grid_y, elevation, sprite.width) - offset;
    DrawCommand {
        sprite: sprite.handle.0,
        x: p.x,
        y: p.y,
        elevation,
    }
}

fn push_entity(
    buckets: &mut DepthBuckets,
    entity: &Entity,
    terrain: &TerrainGrid,
    camera: &Camera,
    margin: f32,
) {
    if !entity.active {
        return;
    }
    let Some(sprite) = entity.sprite() else {
        return;
    };
    let p = entity.render_pos() - camera.offset;
    if !camera.is_rect_visible(p, sprite.size(), margin) {
        return;
    }

    if let (Some(shadow), Some(ground)) = (entity.shadow, terrain.try_height_at(entity.pos.x, entity.pos.y)) {
        let at = Vec3::new(entity.pos.x, entity.pos.y, ground);
        let footprint = Vec2::new(entity.radius * 2.0, entity.radius);
        let s = projection::to_screen(at, footprint) - camera.offset;
        buckets.insert(
            depth_key_at(at),
            DrawCommand {
                sprite: shadow.0,
                x: s.x,
                y: s.y,
                elevation: ground,
            },
        );
    }

    buckets.insert(
        entity.depth_key(),
        DrawCommand {
            sprite: sprite.handle.0,
            x: p.x,
            y: p.y,
            elevation: entity.pos.z,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::Animation;
    use crate::components::shape::SlopeShape;
    use crate::components::sprite::{AtlasId, SpriteDef, SpriteHandle};

    const TILE: u32 = 0;
    const COLUMN: u32 = 1;
    const HERO: u32 = 7;
    const GRUNT: u32 = 8;
    const SHADOW: u32 = 9;

    fn registry() -> AssetRegistry {
        let mut reg = AssetRegistry::new();
        let def = SpriteDef {
            atlas: AtlasId(0),
            col: 0,
            row: 0,
            width: 128.0,
            height: 64.0,
        };
        let tile = reg.register("tile", def);
        for shape in SlopeShape::ALL {
            reg.set_tile_sprite(shape, tile);
        }
        let column = reg.register("column", def);
        reg.set_column_sprite(column);
        reg
    }

    fn actor(sprite: u32, x: f32, y: f32, group: EntityGroup) -> Entity {
        Entity::new(
            vec![Animation::still(Sprite::new(SpriteHandle(sprite), 32.0, 48.0))],
            8.0,
        )
        .unwrap()
        .with_pos(Vec2::new(x, y))
        .with_group(group)
    }

    /// Camera that shows all of a small map near the origin.
    fn overview() -> Camera {
        let mut cam = Camera::default();
        cam.offset = Vec2::new(-400.0, -100.0);
        cam
    }

    fn build(terrain: &TerrainGrid, scene: &Scene, camera: &Camera) -> DrawList {
        let mut list = DrawList::new();
        build_draw_list(
            terrain,
            scene,
            camera,
            &registry(),
            &EngineConfig::default(),
            &mut list,
        );
        list
    }

    fn sprites(list: &DrawList) -> Vec<u32> {
        list.iter().map(|c| c.sprite).collect()
    }

    #[test]
    fn raised_tile_gets_column_fill() {
        let terrain = TerrainGrid::flat(1, 1, 2);
        let list = build(&terrain, &Scene::new(), &overview());
        assert_eq!(sprites(&list), vec![COLUMN, COLUMN, TILE]);

        let elevations: Vec<f32> = list.iter().map(|c| c.elevation).collect();
        assert_eq!(elevations, vec![0.0, 32.0, 64.0]);

        let top = list.as_slice()[2];
        assert_eq!((top.x, top.y), (336.0, 36.0));
        let upper_fill = list.as_slice()[1];
        assert_eq!((upper_fill.x, upper_fill.y), (336.0, 68.0));
    }

    #[test]
    fn entity_sorts_between_tiles() {
        let terrain = TerrainGrid::flat(3, 3, 0);
        let mut scene = Scene::new();
        scene.spawn(actor(HERO, 96.0, 96.0, EntityGroup::Player));
        let list = build(&terrain, &scene, &overview());
        assert_eq!(list.len(), 10);
        // Tiles keyed at or below the hero's key (202) come first.
        assert_eq!(list.as_slice()[6].sprite, HERO);
        assert_eq!(list.as_slice()[6].x, 384.0);
        assert_eq!(list.as_slice()[6].y, 148.0);
    }

    #[test]
    fn same_bucket_keeps_pass_then_scene_order() {
        let terrain = TerrainGrid::flat(3, 3, 0);
        let mut scene = Scene::new();
        scene.spawn(actor(HERO, 96.0, 96.0, EntityGroup::Player));
        scene.spawn(actor(GRUNT, 100.0, 100.0, EntityGroup::Enemies));
        scene.spawn(actor(GRUNT + 10, 90.0, 90.0, EntityGroup::Enemies));

        let order: Vec<u32> = sprites(&build(&terrain, &scene, &overview()))
            .into_iter()
            .filter(|&s| s != TILE)
            .collect();
        assert_eq!(order, vec![GRUNT, GRUNT + 10, HERO]);
    }

    #[test]
    fn shadow_is_drawn_just_before_its_owner() {
        let terrain = TerrainGrid::flat(3, 3, 0);
        let mut scene = Scene::new();
        scene.spawn(actor(HERO, 96.0, 96.0, EntityGroup::Player).with_shadow(SpriteHandle(SHADOW)));
        let list = build(&terrain, &scene, &overview());

        let shadow = list.iter().position(|c| c.sprite == SHADOW).unwrap();
        let hero = list.iter().position(|c| c.sprite == HERO).unwrap();
        assert_eq!(shadow + 1, hero);
        // 16x8 footprint centered under the feet at (0, 96).
        let s = list.as_slice()[shadow];
        assert_eq!((s.x, s.y), (392.0, 188.0));
    }

    #[test]
    fn airborne_entity_sorts_above_its_shadow_bucket() {
        let terrain = TerrainGrid::flat(3, 3, 0);
        let mut scene = Scene::new();
        scene.spawn(
            actor(HERO, 96.0, 96.0, EntityGroup::Player)
                .with_elevation(80.0)
                .with_shadow(SpriteHandle(SHADOW)),
        );
        let list = build(&terrain, &scene, &overview());
        let shadow = list.iter().position(|c| c.sprite == SHADOW).unwrap();
        let hero = list.iter().position(|c| c.sprite == HERO).unwrap();
        assert!(shadow < hero);
        assert_eq!(list.as_slice()[shadow].elevation, 0.0);
        assert_eq!(list.as_slice()[hero].elevation, 80.0);
    }

    #[test]
    fn no_shadow_over_void() {
        let terrain = TerrainGrid::flat(1, 1, 0);
        let mut scene = Scene::new();
        scene.spawn(actor(HERO, 100.0, 100.0, EntityGroup::Player).with_shadow(SpriteHandle(SHADOW)));
        let list = build(&terrain, &scene, &overview());
        assert!(list.iter().all(|c| c.sprite != SHADOW));
        assert!(list.iter().any(|c| c.sprite == HERO));
    }

    #[test]
    fn offscreen_and_inactive_entities_are_skipped() {
        let terrain = TerrainGrid::flat(3, 3, 0);
        let mut scene = Scene::new();
        scene.spawn(actor(HERO, 5000.0, 0.0, EntityGroup::Player));
        let mut ghost = actor(GRUNT, 96.0, 96.0, EntityGroup::Enemies);
        ghost.active = false;
        scene.spawn(ghost);
        let list = build(&terrain, &scene, &overview());
        assert_eq!(sprites(&list), vec![TILE; 9]);
    }

    #[test]
    fn large_map_is_culled_to_the_viewport() {
        let terrain = TerrainGrid::flat(200, 200, 0);
        let mut cam = Camera::default();
        cam.offset = Vec2::new(-400.0, 0.0);
        let list = build(&terrain, &Scene::new(), &cam);
        assert!(!list.is_empty());
        assert!(list.len() < 400, "drew {} tiles", list.len());
        // Tile (5, 5) hangs at world-screen (0, 320): well inside the view.
        assert!(list.iter().any(|c| c.x == 336.0 && c.y == 320.0));
        assert!(list
            .iter()
            .all(|c| c.x > -512.0 && c.x < 1312.0 && c.y > -256.0 && c.y < 736.0));
    }

    #[test]
    fn culling_keeps_every_visible_tile() {
        let terrain = TerrainGrid::flat(40, 40, 1);
        let mut cam = Camera::default();
        cam.offset = Vec2::new(-300.0, 400.0);
        let list = build(&terrain, &Scene::new(), &cam);
        // Every tile whose diamond overlaps the viewport must be present.
        for tile in terrain.iter() {
            let p = projection::tile_to_screen(tile.grid_x, tile.grid_y, tile.base_elevation, 128.0)
                - cam.offset;
            if cam.is_rect_visible(p, Vec2::new(128.0, 64.0), 0.0) {
                assert!(
                    list.iter().any(|c| c.sprite == TILE && c.x == p.x && c.y == p.y),
                    "tile ({}, {}) missing",
                    tile.grid_x,
                    tile.grid_y
                );
            }
        }
    }

    #[test]
    fn far_away_camera_draws_nothing() {
        let terrain = TerrainGrid::flat(10, 10, 0);
        let mut cam = Camera::default();
        cam.offset = Vec2::new(100_000.0, 100_000.0);
        assert!(build(&terrain, &Scene::new(), &cam).is_empty());
    }

    #[test]
    fn same_snapshot_same_list() {
        let terrain = TerrainGrid::parse("0 0 1 1 2 0\n0 6 1 0 0 2\n").unwrap();
        let mut scene = Scene::new();
        scene.spawn(actor(HERO, 40.0, 40.0, EntityGroup::Player));
        scene.spawn(actor(GRUNT, 100.0, 30.0, EntityGroup::Enemies));
        let a = build(&terrain, &scene, &overview());
        let b = build(&terrain, &scene, &overview());
        assert_eq!(a, b);
    }

    #[test]
    fn tile_window_rows_and_columns() {
        let cam = Camera::default();
        let window = TileWindow::new(&cam, 0.0, 0);
        assert_eq!(window.first_row, -2);
        assert_eq!(window.last_row, 15);
        assert_eq!(window.first_col, -1);
        assert_eq!(window.last_col, 14);
        // Every emitted cell honours both windows.
        for (gx, gy) in window.cells(30, 30) {
            let r = (gx + gy) as i64;
            let c = gx as i64 - gy as i64;
            assert!(r >= window.first_row && r <= window.last_row);
            assert!(c >= window.first_col && c <= window.last_col);
        }
    }
}
