use std::collections::HashMap;

use crate::assets::manifest::AssetManifest;
use crate::components::animation::Animation;
use crate::components::shape::SlopeShape;
use crate::components::sprite::{AtlasId, Sprite, SpriteDef, SpriteHandle};
use crate::error::AssetError;

/// Registry of sprites and animations, built from an [`AssetManifest`] or
/// filled in by hand.
///
/// Names are resolved once, here. Everything downstream (entities, the draw
/// list) only carries [`SpriteHandle`]s.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    defs: Vec<SpriteDef>,
    names: HashMap<String, SpriteHandle>,
    animations: HashMap<String, Animation>,
    tiles: [Option<SpriteHandle>; SlopeShape::COUNT],
    column: Option<SpriteHandle>,
    shadow: Option<SpriteHandle>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed manifest. Every name the manifest
    /// refers to (animation frames, tiles, column, shadow) must be one of its
    /// sprites.
    pub fn from_manifest(manifest: &AssetManifest) -> Result<Self, AssetError> {
        let mut reg = Self::new();
        for (name, desc) in &manifest.sprites {
            reg.register(
                name,
                SpriteDef {
                    atlas: AtlasId(desc.atlas),
                    col: desc.col,
                    row: desc.row,
                    width: desc.width,
                    height: desc.height,
                },
            );
        }

        for (name, desc) in &manifest.animations {
            let frames = desc
                .frames
                .iter()
                .map(|frame| reg.sprite_named(frame))
                .collect::<Result<Vec<_>, _>>()?;
            let animation = Animation::new(frames, desc.speed).with_lock(desc.locked);
            reg.register_animation(name, animation);
        }

        for (&shape, name) in &manifest.tiles {
            let handle = reg.resolve(name)?;
            reg.set_tile_sprite(shape, handle);
        }
        if let Some(name) = &manifest.column {
            reg.column = Some(reg.resolve(name)?);
        }
        if let Some(name) = &manifest.shadow {
            reg.shadow = Some(reg.resolve(name)?);
        }

        log::info!(
            "asset registry: {} sprites, {} animations",
            reg.defs.len(),
            reg.animations.len()
        );
        Ok(reg)
    }

    /// Parse a manifest from JSON and build the registry from it.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        let manifest = AssetManifest::from_json(json)?;
        Self::from_manifest(&manifest)
    }

    /// Add a sprite. Registering an existing name replaces its definition and
    /// keeps its handle.
    pub fn register(&mut self, name: &str, def: SpriteDef) -> SpriteHandle {
        if let Some(&handle) = self.names.get(name) {
            self.defs[handle.0 as usize] = def;
            return handle;
        }
        let handle = SpriteHandle(self.defs.len() as u32);
        self.defs.push(def);
        self.names.insert(name.to_string(), handle);
        handle
    }

    pub fn register_animation(&mut self, name: &str, animation: Animation) {
        self.animations.insert(name.to_string(), animation);
    }

    pub fn set_tile_sprite(&mut self, shape: SlopeShape, handle: SpriteHandle) {
        self.tiles[shape.code() as usize] = Some(handle);
    }

    pub fn set_column_sprite(&mut self, handle: SpriteHandle) {
        self.column = Some(handle);
    }

    pub fn set_shadow_sprite(&mut self, handle: SpriteHandle) {
        self.shadow = Some(handle);
    }

    /// Look up a sprite handle by name.
    pub fn handle(&self, name: &str) -> Option<SpriteHandle> {
        self.names.get(name).copied()
    }

    /// Atlas placement and footprint of a sprite.
    pub fn def(&self, handle: SpriteHandle) -> Option<&SpriteDef> {
        self.defs.get(handle.0 as usize)
    }

    /// Sprite with its footprint, for animation frames and draw commands.
    pub fn sprite(&self, handle: SpriteHandle) -> Option<Sprite> {
        self.def(handle)
            .map(|def| Sprite::new(handle, def.width, def.height))
    }

    /// Look up a sprite by name. Unknown names are logged and reported.
    pub fn sprite_named(&self, name: &str) -> Result<Sprite, AssetError> {
        let handle = self.resolve(name)?;
        self.sprite(handle)
            .ok_or_else(|| AssetError::UnknownSprite(name.to_string()))
    }

    /// Sprite drawn for tiles of the given shape, if the game provided one.
    pub fn tile_sprite(&self, shape: SlopeShape) -> Option<Sprite> {
        self.tiles[shape.code() as usize].and_then(|h| self.sprite(h))
    }

    pub fn column_sprite(&self) -> Option<Sprite> {
        self.column.and_then(|h| self.sprite(h))
    }

    pub fn shadow_sprite(&self) -> Option<SpriteHandle> {
        self.shadow
    }

    /// A fresh copy of a named animation, rewound to its first frame.
    pub fn animation(&self, name: &str) -> Result<Animation, AssetError> {
        match self.animations.get(name) {
            Some(animation) => {
                let mut animation = animation.clone();
                animation.reset();
                Ok(animation)
            }
            None => {
                log::warn!("unknown animation '{name}'");
                Err(AssetError::UnknownAnimation(name.to_string()))
            }
        }
    }

    /// An entity's animation set, one animation per state, in the given order.
    pub fn animation_set(&self, names: &[&str]) -> Result<Vec<Animation>, AssetError> {
        names.iter().map(|name| self.animation(name)).collect()
    }

    /// Number of registered sprites.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    fn resolve(&self, name: &str) -> Result<SpriteHandle, AssetError> {
        self.handle(name).ok_or_else(|| {
            log::warn!("unknown sprite '{name}'");
            AssetError::UnknownSprite(name.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "atlases": [
            { "name": "world", "cols": 16, "rows": 8, "path": "world.png" }
        ],
        "sprites": {
            "grass": { "atlas": 0, "col": 0, "row": 0, "width": 128, "height": 64 },
            "dirt": { "atlas": 0, "col": 1, "row": 0, "width": 128, "height": 64 },
            "hero_0": { "atlas": 0, "col": 0, "row": 2, "width": 32, "height": 48 },
            "hero_1": { "atlas": 0, "col": 1, "row": 2, "width": 32, "height": 48 },
            "shadow": { "atlas": 0, "col": 5, "row": 5, "width": 32, "height": 16 }
        },
        "animations": {
            "hero_walk": { "frames": ["hero_0", "hero_1"], "speed": 0.5 },
            "hero_idle": { "frames": ["hero_0"], "speed": 0 }
        },
        "tiles": { "flat": "grass" },
        "column": "dirt",
        "shadow": "shadow"
    }"#;

    #[test]
    fn loads_from_manifest() {
        let reg = AssetRegistry::from_json(MANIFEST).unwrap();
        assert_eq!(reg.len(), 5);

        let hero = reg.handle("hero_1").expect("hero_1 should exist");
        let def = reg.def(hero).unwrap();
        assert_eq!(def.atlas, AtlasId(0));
        assert_eq!(def.col, 1);
        assert_eq!(def.row, 2);
        assert_eq!(reg.sprite(hero).unwrap().size().y, 48.0);
    }

    #[test]
    fn handles_follow_sorted_names() {
        let reg = AssetRegistry::from_json(MANIFEST).unwrap();
        assert_eq!(reg.handle("dirt"), Some(SpriteHandle(0)));
        assert_eq!(reg.handle("shadow"), Some(SpriteHandle(4)));
    }

    #[test]
    fn terrain_sprites_resolve() {
        let reg = AssetRegistry::from_json(MANIFEST).unwrap();
        assert_eq!(
            reg.tile_sprite(SlopeShape::Flat).map(|s| s.handle),
            reg.handle("grass")
        );
        assert!(reg.tile_sprite(SlopeShape::North).is_none());
        assert_eq!(reg.column_sprite().map(|s| s.handle), reg.handle("dirt"));
        assert_eq!(reg.shadow_sprite(), reg.handle("shadow"));
    }

    #[test]
    fn animation_set_in_state_order() {
        let reg = AssetRegistry::from_json(MANIFEST).unwrap();
        let set = reg.animation_set(&["hero_idle", "hero_walk"]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].frame_count(), 1);
        assert_eq!(set[1].frame_count(), 2);
        assert_eq!(set[1].speed, 0.5);
    }

    #[test]
    fn animation_copies_start_rewound() {
        let reg = AssetRegistry::from_json(MANIFEST).unwrap();
        let mut walk = reg.animation("hero_walk").unwrap();
        walk.advance();
        walk.advance();
        assert_eq!(walk.frame_index(), 1);
        assert_eq!(reg.animation("hero_walk").unwrap().frame_index(), 0);
    }

    #[test]
    fn unknown_names_are_errors() {
        let reg = AssetRegistry::from_json(MANIFEST).unwrap();
        assert!(matches!(
            reg.animation_set(&["hero_walk", "hero_fly"]),
            Err(AssetError::UnknownAnimation(name)) if name == "hero_fly"
        ));
        assert!(matches!(
            reg.sprite_named("nonexistent"),
            Err(AssetError::UnknownSprite(_))
        ));
    }

    #[test]
    fn manifest_with_dangling_frame_is_rejected() {
        let json = r#"{
            "sprites": { "a": { "atlas": 0, "col": 0, "row": 0, "width": 8, "height": 8 } },
            "animations": { "blink": { "frames": ["a", "b"] } }
        }"#;
        assert!(matches!(
            AssetRegistry::from_json(json),
            Err(AssetError::UnknownSprite(name)) if name == "b"
        ));
    }

    #[test]
    fn bad_json_is_an_asset_error() {
        assert!(matches!(
            AssetRegistry::from_json("{ sprites"),
            Err(AssetError::Json(_))
        ));
    }

    #[test]
    fn reregistering_keeps_handle() {
        let mut reg = AssetRegistry::new();
        let def = SpriteDef {
            atlas: AtlasId(0),
            col: 0,
            row: 0,
            width: 10.0,
            height: 10.0,
        };
        let first = reg.register("box", def);
        let second = reg.register("box", SpriteDef { width: 20.0, ..def });
        assert_eq!(first, second);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.def(first).unwrap().width, 20.0);
    }
}
