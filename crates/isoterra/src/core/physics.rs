//! Gravity and ground physics against the terrain height field.
//!
//! One [`Integrator::step`] per entity per tick:
//!
//! 1. Vertical: gravity, then snap onto the ground when falling onto it.
//! 2. Horizontal, one axis at a time: a move into a column that is void or
//!    half a step (or more) above the entity's feet is undone on that axis
//!    only, so actors slide along walls instead of sticking to them.
//!
//! Collisions only block displacement. There is no bounce and no impulse.

use crate::components::entity::Entity;
use crate::components::tilemap::TerrainGrid;
use crate::config::EngineConfig;
use crate::core::projection::TILE_HEIGHT;
use crate::core::scene::Scene;

/// Per-tick integrator parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integrator {
    pub gravity: f32,
    pub jump_speed: f32,
    pub ground_tolerance: f32,
}

impl Default for Integrator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl Integrator {
    pub fn new(gravity: f32, jump_speed: f32, ground_tolerance: f32) -> Self {
        Self {
            gravity,
            jump_speed,
            ground_tolerance,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.gravity, config.jump_speed, config.ground_tolerance)
    }

    /// Advance one entity by one tick.
    pub fn step(&self, entity: &mut Entity, terrain: &TerrainGrid) {
        self.step_vertical(entity, terrain);
        self.step_horizontal(entity, terrain);
    }

    /// Advance every active entity in the scene by one tick.
    pub fn step_all(&self, scene: &mut Scene, terrain: &TerrainGrid) {
        for (_, entity) in scene.iter_mut() {
            if entity.active {
                self.step(entity, terrain);
            }
        }
    }

    fn step_vertical(&self, entity: &mut Entity, terrain: &TerrainGrid) {
        entity.velocity.z -= self.gravity;
        entity.pos.z += entity.velocity.z;

        // Over void there is nothing to land on.
        let Some(ground) = terrain.try_height_at(entity.pos.x, entity.pos.y) else {
            return;
        };
        if entity.velocity.z <= 0.0 && entity.pos.z <= ground + self.ground_tolerance {
            entity.pos.z = ground;
            entity.velocity.z = 0.0;
        }
    }

    fn step_horizontal(&self, entity: &mut Entity, terrain: &TerrainGrid) {
        let old_x = entity.pos.x;
        let old_y = entity.pos.y;

        entity.pos.x += entity.velocity.x;
        if is_blocked(terrain, entity.pos.x, entity.pos.y, entity.pos.z) {
            entity.pos.x = old_x;
        }

        entity.pos.y += entity.velocity.y;
        if is_blocked(terrain, entity.pos.x, entity.pos.y, entity.pos.z) {
            entity.pos.y = old_y;
        }
    }

    /// Start a jump if the entity rests on (or right above) the ground.
    /// Returns whether the jump happened.
    pub fn jump(&self, entity: &mut Entity, terrain: &TerrainGrid) -> bool {
        if entity.velocity.z != 0.0 {
            return false;
        }
        let Some(ground) = Self::ground_under(entity, terrain) else {
            return false;
        };
        if (entity.pos.z - ground).abs() < entity.speed {
            entity.velocity.z = self.jump_speed;
            true
        } else {
            false
        }
    }

    /// Terrain height under the entity, or None over void.
    pub fn ground_under(entity: &Entity, terrain: &TerrainGrid) -> Option<f32> {
        terrain.try_height_at(entity.pos.x, entity.pos.y)
    }

    /// Resting on the terrain with no vertical motion.
    pub fn is_grounded(entity: &Entity, terrain: &TerrainGrid) -> bool {
        entity.velocity.z == 0.0 && Self::ground_under(entity, terrain) == Some(entity.pos.z)
    }
}

/// A column is impassable when it is void or at least half a step above `h`.
fn is_blocked(terrain: &TerrainGrid, x: f32, y: f32, h: f32) -> bool {
    match terrain.try_height_at(x, y) {
        Some(ground) => ground >= h + TILE_HEIGHT / 2.0,
        None => true,
    }
}
