use glam::Vec2;

/// Identifies which texture atlas a sprite belongs to.
/// Index into the AssetManifest's atlas list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

/// Stable handle to a sprite registered in the [`AssetRegistry`](crate::assets::registry::AssetRegistry).
/// This is what ends up in draw commands; the painter resolves it to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SpriteHandle(pub u32);

/// Where a sprite lives in its atlas and how big it is on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDef {
    pub atlas: AtlasId,
    /// Column in the atlas grid.
    pub col: u32,
    /// Row in the atlas grid.
    pub row: u32,
    /// Screen footprint in pixels.
    pub width: f32,
    pub height: f32,
}

/// A sprite reference together with its footprint, as carried by animation frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub handle: SpriteHandle,
    pub width: f32,
    pub height: f32,
}

impl Sprite {
    pub fn new(handle: SpriteHandle, width: f32, height: f32) -> Self {
        Self { handle, width, height }
    }

    /// Screen footprint (width, height).
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}
