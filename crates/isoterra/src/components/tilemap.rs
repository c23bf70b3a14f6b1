//! Terrain grid: a row-major field of sloped tiles answering height queries.
//!
//! The grid is built once from map data and read-only afterwards. Empty cells
//! (`None`) are void: they have no height and are never drawn.

use glam::Vec2;

use crate::components::shape::SlopeShape;
use crate::core::projection::{TILE_HEIGHT, TILE_SIZE};
use crate::error::MapError;

/// Height reported for points with no terrain under them.
/// Large enough that every "can I step there" test fails.
pub const VOID_HEIGHT: f32 = f32::MAX;

/// A single terrain cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub shape: SlopeShape,
    /// Elevation of the tile's high side, a multiple of `TILE_HEIGHT`.
    pub base_elevation: f32,
    pub grid_x: u32,
    pub grid_y: u32,
}

impl Tile {
    /// Create a tile `level` steps above the ground plane.
    pub fn new(shape: SlopeShape, level: u32, grid_x: u32, grid_y: u32) -> Self {
        Self {
            shape,
            base_elevation: level as f32 * TILE_HEIGHT,
            grid_x,
            grid_y,
        }
    }

    /// Height at a local offset inside the tile.
    #[inline]
    pub fn height_at_local(&self, lx: f32, ly: f32) -> f32 {
        self.shape.height(self.base_elevation, lx, ly)
    }

    /// Number of whole elevation steps, i.e. how many column-fill sprites sit under it.
    pub fn levels(&self) -> u32 {
        (self.base_elevation / TILE_HEIGHT).floor().max(0.0) as u32
    }

    /// Painter's-algorithm sort key.
    pub fn depth_key(&self) -> i32 {
        self.grid_x as i32 * 101 + self.grid_y as i32 * 100 + self.levels() as i32
    }
}

/// A cell description as it comes out of a map: shape plus elevation level.
pub type CellSpec = Option<(SlopeShape, u32)>;

#[derive(Debug, Clone)]
pub struct TerrainGrid {
    width: u32,
    height: u32,
    tiles: Vec<Option<Tile>>,
    max_elevation: f32,
}

impl TerrainGrid {
    /// A grid filled with flat tiles at `level`.
    pub fn flat(width: u32, height: u32, level: u32) -> Self {
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for gy in 0..height {
            for gx in 0..width {
                tiles.push(Some(Tile::new(SlopeShape::Flat, level, gx, gy)));
            }
        }
        let max_elevation = if width * height > 0 { level as f32 * TILE_HEIGHT } else { 0.0 };
        Self { width, height, tiles, max_elevation }
    }

    /// Build a grid from rows of cells. Rows may be ragged; the grid is as wide
    /// as the longest row and the missing tail cells are void.
    pub fn from_rows(rows: Vec<Vec<CellSpec>>) -> Result<Self, MapError> {
        let height = rows.len() as u32;
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;

        let mut tiles = vec![None; (width * height) as usize];
        let mut max_elevation = 0.0_f32;
        let mut count = 0usize;

        for (gy, row) in rows.into_iter().enumerate() {
            for (gx, cell) in row.into_iter().enumerate() {
                if let Some((shape, level)) = cell {
                    let tile = Tile::new(shape, level, gx as u32, gy as u32);
                    max_elevation = max_elevation.max(tile.base_elevation);
                    tiles[gy * width as usize + gx] = Some(tile);
                    count += 1;
                }
            }
        }

        if count == 0 {
            return Err(MapError::Empty);
        }

        log::debug!("terrain grid built: {width}x{height}, {count} tiles");
        Ok(Self { width, height, tiles, max_elevation })
    }

    /// Parse map text (`height type` pairs per cell). See [`crate::assets::map`].
    pub fn parse(text: &str) -> Result<Self, MapError> {
        Self::from_rows(crate::assets::map::parse_rows(text))
    }

    /// Width in tiles.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Highest base elevation on the map.
    pub fn max_elevation(&self) -> f32 {
        self.max_elevation
    }

    /// World-space extent of the grid.
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.width as f32 * TILE_SIZE, self.height as f32 * TILE_SIZE)
    }

    /// Get the tile at grid position (x, y).
    pub fn get(&self, x: u32, y: u32) -> Option<&Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles[(y * self.width + x) as usize].as_ref()
    }

    /// The tile under a world point, with the point's local offset inside it.
    pub fn tile_at_world(&self, x: f32, y: f32) -> Option<(&Tile, Vec2)> {
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let tx = (x / TILE_SIZE).floor();
        let ty = (y / TILE_SIZE).floor();
        if tx >= self.width as f32 || ty >= self.height as f32 {
            return None;
        }
        let tile = self.get(tx as u32, ty as u32)?;
        Some((tile, Vec2::new(x - tx * TILE_SIZE, y - ty * TILE_SIZE)))
    }

    /// Terrain elevation at a world point, or `None` over void.
    pub fn try_height_at(&self, x: f32, y: f32) -> Option<f32> {
        self.tile_at_world(x, y)
            .map(|(tile, local)| tile.height_at_local(local.x, local.y))
    }

    /// Terrain elevation at a world point, or [`VOID_HEIGHT`] over void.
    pub fn height_at(&self, x: f32, y: f32) -> f32 {
        self.try_height_at(x, y).unwrap_or(VOID_HEIGHT)
    }

    /// Iterate over every non-empty tile in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().flatten()
    }

    /// Count of non-empty tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }

    /// Total capacity in tiles.
    pub fn capacity(&self) -> usize {
        (self.width * self.height) as usize
    }
}
