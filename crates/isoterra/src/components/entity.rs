use std::f32::consts::SQRT_2;

use glam::{Vec2, Vec3};

use crate::components::animation::Animation;
use crate::components::group::EntityGroup;
use crate::components::sprite::{Sprite, SpriteHandle};
use crate::core::projection::{self, TILE_HEIGHT, TILE_SIZE};
use crate::error::EntityError;

/// Velocities at or below this magnitude count as "not moving on that axis".
const MOVE_EPSILON: f32 = 0.001;

/// A moving actor: player parts, enemies, projectiles, decals.
///
/// World position is `pos.x`, `pos.y` on the ground plane and `pos.z` as
/// elevation. The footprint used for projection is the current animation
/// frame's sprite size.
#[derive(Debug, Clone)]
pub struct Entity {
    /// String tag for finding entities by name.
    pub tag: String,
    /// Which renderer pass the entity belongs to.
    pub group: EntityGroup,
    /// Inactive entities are neither simulated nor drawn.
    pub active: bool,
    /// World position; `z` is elevation.
    pub pos: Vec3,
    /// Per-tick velocity; `z` is vertical.
    pub velocity: Vec3,
    /// Collision radius in screen pixels.
    pub radius: f32,
    /// Planar movement speed per tick.
    pub speed: f32,
    /// Drop shadow drawn on the ground under the entity.
    pub shadow: Option<SpriteHandle>,
    state: usize,
    animations: Vec<Animation>,
}

/// Collision radius for an actor whose first frame is `width` pixels wide.
pub fn radius_from_width(width: f32, radius_constant: f32) -> f32 {
    width / radius_constant
}

impl Entity {
    /// Create an entity from its animation set, one animation per state.
    ///
    /// Fails when the set is empty or an animation has no frames: without a
    /// frame there is no footprint to project.
    pub fn new(animations: Vec<Animation>, radius: f32) -> Result<Self, EntityError> {
        if animations.is_empty() {
            return Err(EntityError::EmptyAnimationSet);
        }
        if let Some(idx) = animations.iter().position(|a| a.frames.is_empty()) {
            return Err(EntityError::EmptyAnimation(idx));
        }
        Ok(Self {
            tag: String::new(),
            group: EntityGroup::default(),
            active: true,
            pos: Vec3::ZERO,
            velocity: Vec3::ZERO,
            radius,
            speed: 0.0,
            shadow: None,
            state: 0,
            animations,
        })
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_group(mut self, group: EntityGroup) -> Self {
        self.group = group;
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos.x = pos.x;
        self.pos.y = pos.y;
        self
    }

    pub fn with_elevation(mut self, h: f32) -> Self {
        self.pos.z = h;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_shadow(mut self, shadow: SpriteHandle) -> Self {
        self.shadow = Some(shadow);
        self
    }

    // -- Projection --

    /// Screen footprint of the current frame.
    pub fn footprint(&self) -> Vec2 {
        self.animation().size()
    }

    /// Top-left corner of the sprite in world-screen space (no camera offset).
    pub fn render_pos(&self) -> Vec2 {
        projection::to_screen(self.pos, self.footprint())
    }

    pub fn render_screen_x(&self) -> f32 {
        self.render_pos().x
    }

    pub fn render_screen_y(&self) -> f32 {
        self.render_pos().y
    }

    /// Painter's-algorithm key. The trailing `+ 1` puts an actor above the
    /// tile it stands on when both fall in the same coarse cell.
    pub fn depth_key(&self) -> i32 {
        depth_key_at(self.pos)
    }

    /// Cylinder-ish overlap test: circles around the projected feet plus an
    /// elevation band as tall as the other entity's sprite.
    pub fn collides_with(&self, other: &Entity) -> bool {
        let a = self.render_pos() + self.footprint() * Vec2::new(0.5, 1.0);
        let b = other.render_pos() + other.footprint() * Vec2::new(0.5, 1.0);
        a.distance(b) <= self.radius + other.radius
            && (self.pos.z - other.pos.z).abs() <= other.footprint().y
    }

    // -- Movement intents --

    /// Set movement along world x. `dir` is reduced to its sign.
    pub fn move_x(&mut self, dir: i32) {
        let dy = axis_dir(self.velocity.y);
        self.set_heading(dir.signum() as f32, dy);
    }

    /// Set movement along world y. `dir` is reduced to its sign.
    pub fn move_y(&mut self, dir: i32) {
        let dx = axis_dir(self.velocity.x);
        self.set_heading(dx, dir.signum() as f32);
    }

    /// Set both planar axes at once. Diagonals move at `speed`, not `speed·√2`.
    pub fn set_heading(&mut self, dx: f32, dy: f32) {
        let dx = axis_dir(dx);
        let dy = axis_dir(dy);
        let scale = if dx != 0.0 && dy != 0.0 {
            self.speed / SQRT_2
        } else {
            self.speed
        };
        self.velocity.x = dx * scale;
        self.velocity.y = dy * scale;
    }

    /// Stop planar movement.
    pub fn halt(&mut self) {
        self.velocity.x = 0.0;
        self.velocity.y = 0.0;
    }

    // -- Animation state --

    /// Current animation state index.
    pub fn state(&self) -> usize {
        self.state
    }

    /// Switch animation state. Out-of-range states are ignored; switching to
    /// a different state rewinds the new animation.
    pub fn set_state(&mut self, state: usize) {
        if state >= self.animations.len() || state == self.state {
            return;
        }
        self.state = state;
        self.animations[state].reset();
    }

    pub fn animation(&self) -> &Animation {
        &self.animations[self.state]
    }

    pub fn animation_mut(&mut self) -> &mut Animation {
        &mut self.animations[self.state]
    }

    /// Current frame sprite.
    pub fn sprite(&self) -> Option<&Sprite> {
        self.animation().current()
    }

    pub fn advance_animation(&mut self) {
        self.animation_mut().advance();
    }

    pub fn reset_animation(&mut self) {
        self.animation_mut().reset();
    }
}

/// Depth key of an actor at a world position.
/// Saturates instead of overflowing for actors far outside the map.
pub fn depth_key_at(pos: Vec3) -> i32 {
    ((pos.y / TILE_SIZE).floor() as i32)
        .saturating_mul(100)
        .saturating_add(((pos.x / TILE_SIZE).floor() as i32).saturating_mul(101))
        .saturating_add((pos.z / TILE_HEIGHT).floor() as i32)
        .saturating_add(1)
}

fn axis_dir(v: f32) -> f32 {
    if v.abs() <= MOVE_EPSILON {
        0.0
    } else {
        v.signum()
    }
}
