//! Slope shapes for terrain tiles.
//!
//! Each shape is a planar ramp over the tile's local square `[0, TILE_SIZE)²`,
//! clamped so its edges meet a flat neighbor one step up or down.

use serde::{Deserialize, Serialize};

use crate::core::projection::TILE_HEIGHT;

/// The nine supported tile shapes.
///
/// Discriminants are the type codes used in map text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SlopeShape {
    #[default]
    Flat = 0,
    NorthWest = 1,
    North = 2,
    NorthEast = 3,
    East = 4,
    SouthEast = 5,
    South = 6,
    SouthWest = 7,
    West = 8,
}

impl SlopeShape {
    /// Total number of shapes.
    pub const COUNT: usize = 9;

    /// Every shape, in type-code order.
    pub const ALL: [SlopeShape; Self::COUNT] = [
        SlopeShape::Flat,
        SlopeShape::NorthWest,
        SlopeShape::North,
        SlopeShape::NorthEast,
        SlopeShape::East,
        SlopeShape::SouthEast,
        SlopeShape::South,
        SlopeShape::SouthWest,
        SlopeShape::West,
    ];

    /// Convert a map type code. Returns None for unknown codes.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Terrain elevation at local offset `(lx, ly)` inside a tile whose
    /// base elevation is `base`.
    #[inline]
    pub fn height(self, base: f32, lx: f32, ly: f32) -> f32 {
        match self {
            SlopeShape::Flat => base,
            SlopeShape::North => north(base, lx, ly),
            SlopeShape::South => south(base, lx, ly),
            SlopeShape::East => east(base, lx, ly),
            SlopeShape::West => west(base, lx, ly),
            SlopeShape::NorthEast => north_east(base, lx, ly),
            SlopeShape::SouthWest => south_west(base, lx, ly),
            SlopeShape::NorthWest => north_west(base, lx, ly),
            SlopeShape::SouthEast => south_east(base, lx, ly),
        }
    }
}

fn north(base: f32, _lx: f32, ly: f32) -> f32 {
    base - TILE_HEIGHT + ly / 2.0
}

fn south(base: f32, _lx: f32, ly: f32) -> f32 {
    base - ly / 2.0
}

fn east(base: f32, lx: f32, _ly: f32) -> f32 {
    base - lx / 2.0
}

fn west(base: f32, lx: f32, _ly: f32) -> f32 {
    base - TILE_HEIGHT + lx / 2.0
}

fn north_east(base: f32, lx: f32, ly: f32) -> f32 {
    let diff = lx - ly;
    if diff > 0.0 {
        base - TILE_HEIGHT
    } else {
        base - TILE_HEIGHT - diff / 2.0
    }
}

fn south_west(base: f32, lx: f32, ly: f32) -> f32 {
    let diff = lx - ly;
    if diff < 0.0 {
        base - TILE_HEIGHT
    } else {
        base - TILE_HEIGHT + diff / 2.0
    }
}

fn north_west(base: f32, lx: f32, ly: f32) -> f32 {
    let half_sum = (lx + ly) / 2.0;
    if half_sum < TILE_HEIGHT {
        base
    } else {
        base - TILE_HEIGHT + half_sum
    }
}

fn south_east(base: f32, lx: f32, ly: f32) -> f32 {
    let half_sum = (lx + ly) / 2.0;
    if half_sum > TILE_HEIGHT {
        base - TILE_HEIGHT
    } else {
        base - half_sum
    }
}
