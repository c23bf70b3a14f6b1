use crate::api::types::{CollisionPair, EntityId};
use crate::assets::registry::AssetRegistry;
use crate::components::entity::{radius_from_width, Entity};
use crate::components::group::EntityGroup;
use crate::components::tilemap::TerrainGrid;
use crate::config::EngineConfig;
use crate::core::physics::Integrator;
use crate::core::scene::Scene;
use crate::error::EngineError;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera;
use crate::renderer::draw::DrawList;
use crate::systems::animation::tick_animations;
use crate::systems::collision::collect_collisions;
use crate::systems::render;

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> EngineConfig {
        EngineConfig::default()
    }

    /// Load the map, spawn entities, pick the camera target.
    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError>;

    /// One tick of game rules: read input, steer actors, react to the
    /// collisions found by the previous step, spawn and despawn.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub config: EngineConfig,
    pub scene: Scene,
    /// A single flat tile until a map is loaded.
    pub terrain: TerrainGrid,
    pub camera: Camera,
    pub registry: AssetRegistry,
    pub integrator: Integrator,
    /// Entity the camera follows after every step.
    pub camera_target: Option<EntityId>,
    watched: Vec<(EntityGroup, EntityGroup)>,
    collisions: Vec<CollisionPair>,
    ticks: u64,
}

impl EngineContext {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            scene: Scene::new(),
            terrain: TerrainGrid::flat(1, 1, 0),
            camera: Camera::from_config(&config),
            registry: AssetRegistry::new(),
            integrator: Integrator::from_config(&config),
            camera_target: None,
            watched: Vec::new(),
            collisions: Vec::new(),
            ticks: 0,
            config,
        }
    }

    /// Replace the terrain with a map parsed from text.
    pub fn load_map(&mut self, text: &str) -> Result<(), EngineError> {
        self.terrain = TerrainGrid::parse(text)?;
        log::info!(
            "map loaded: {}x{} ({} tiles)",
            self.terrain.width(),
            self.terrain.height(),
            self.terrain.tile_count()
        );
        Ok(())
    }

    /// Replace the asset registry with one built from a JSON manifest.
    pub fn load_assets(&mut self, manifest_json: &str) -> Result<(), EngineError> {
        self.registry = AssetRegistry::from_json(manifest_json)?;
        Ok(())
    }

    /// Build an actor from named animations, one per state. The collision
    /// radius is the first frame's width over `radius_constant`, and the
    /// registry's shadow (if any) is attached.
    pub fn make_entity(&self, animations: &[&str], radius_constant: f32) -> Result<Entity, EngineError> {
        let set = self.registry.animation_set(animations)?;
        let width = set
            .first()
            .and_then(|a| a.frames.first())
            .map_or(0.0, |frame| frame.width);
        let mut entity = Entity::new(set, radius_from_width(width, radius_constant))?;
        entity.shadow = self.registry.shadow_sprite();
        Ok(entity)
    }

    /// Report collisions between these two groups after every step.
    pub fn watch_collisions(&mut self, a: EntityGroup, b: EntityGroup) {
        if !self.watched.contains(&(a, b)) {
            self.watched.push((a, b));
        }
    }

    /// Collisions found by the last step, in watch order then scene order.
    pub fn collisions(&self) -> &[CollisionPair] {
        &self.collisions
    }

    /// Start a jump for an entity standing on the ground.
    pub fn jump(&mut self, id: EntityId) -> bool {
        match self.scene.get_mut(id) {
            Some(entity) => self.integrator.jump(entity, &self.terrain),
            None => false,
        }
    }

    /// Ticks stepped so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance the world one tick: physics, animations, collisions, camera.
    /// Called by the runner after `Game::update()`.
    pub fn step(&mut self) {
        self.integrator.step_all(&mut self.scene, &self.terrain);
        tick_animations(&mut self.scene);

        self.collisions.clear();
        for &(a, b) in &self.watched {
            collect_collisions(&self.scene, a, b, &mut self.collisions);
        }

        if let Some(target) = self.camera_target.and_then(|id| self.scene.get(id)) {
            self.camera.follow_entity(target);
        }
        self.ticks += 1;
    }

    /// Rebuild the draw list for the current state.
    pub fn build_draw_list(&self, out: &mut DrawList) {
        render::build_draw_list(
            &self.terrain,
            &self.scene,
            &self.camera,
            &self.registry,
            &self.config,
            out,
        );
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
