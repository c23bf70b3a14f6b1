use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::components::shape::SlopeShape;

/// Asset manifest describing the atlases, sprites and animations of a game.
/// Loaded from JSON at runtime; the engine never touches image files itself.
///
/// Sprites are kept in a sorted map so handle assignment does not depend on
/// hash order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// List of texture atlases.
    #[serde(default)]
    pub atlases: Vec<AtlasDescriptor>,
    /// Named sprite lookup: name → atlas cell plus screen footprint.
    #[serde(default)]
    pub sprites: BTreeMap<String, SpriteDescriptor>,
    /// Named animations built from sprite names.
    #[serde(default)]
    pub animations: HashMap<String, AnimationDescriptor>,
    /// Sprite name drawn for each slope shape.
    #[serde(default)]
    pub tiles: HashMap<SlopeShape, String>,
    /// Sprite repeated under raised tiles, one per elevation step.
    #[serde(default)]
    pub column: Option<String>,
    /// Ground shadow drawn under actors that ask for one.
    #[serde(default)]
    pub shadow: Option<String>,
}

/// Describes a single texture atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    /// Human-readable name (e.g., "terrain").
    pub name: String,
    /// Number of columns in the atlas grid.
    pub cols: u32,
    /// Number of rows in the atlas grid.
    pub rows: u32,
    /// Relative path to the image (e.g., "terrain.png").
    pub path: String,
}

/// Describes a named sprite within an atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    /// Index into the atlases array.
    pub atlas: u32,
    /// Column in the atlas grid.
    pub col: u32,
    /// Row in the atlas grid.
    pub row: u32,
    /// Screen footprint in pixels.
    pub width: f32,
    pub height: f32,
}

/// Describes an animation as a list of sprite names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationDescriptor {
    pub frames: Vec<String>,
    /// Frames advanced per tick.
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Hold the last frame instead of looping.
    #[serde(default)]
    pub locked: bool,
}

fn default_speed() -> f32 {
    1.0
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
