pub mod api;
pub mod assets;
pub mod bridge;
pub mod components;
pub mod config;
pub mod core;
pub mod error;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game};
pub use api::types::{CollisionPair, EntityId};
pub use assets::manifest::AssetManifest;
pub use assets::registry::AssetRegistry;
pub use bridge::protocol::ProtocolLayout;
pub use components::animation::Animation;
pub use components::entity::Entity;
pub use components::group::EntityGroup;
pub use components::shape::SlopeShape;
pub use components::sprite::{AtlasId, Sprite, SpriteDef, SpriteHandle};
pub use components::tilemap::{TerrainGrid, Tile, VOID_HEIGHT};
pub use config::EngineConfig;
pub use core::physics::Integrator;
pub use core::projection::{TILE_HEIGHT, TILE_SIZE};
pub use core::scene::Scene;
pub use core::time::{run_frames, FixedTimestep, FramePacer};
pub use error::{AssetError, EngineError, EntityError, MapError};
pub use input::intent::{Facing, KeyBindings, MoveIntent};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::Camera;
pub use renderer::draw::{DrawCommand, DrawList};
pub use renderer::shared::SharedDrawList;
pub use systems::animation::tick_animations;
pub use systems::collision::collect_collisions;
pub use systems::render::build_draw_list;
