use glam::{Vec2, Vec3};

use crate::components::entity::Entity;
use crate::config::EngineConfig;
use crate::core::projection;

/// Scrolling camera over the projected world.
///
/// `offset` is the world-screen point shown at the viewport's top-left
/// corner. Subtracting it from a projected position gives final screen
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub offset: Vec2,
    /// Visible size in screen pixels.
    pub viewport: Vec2,
    /// Easing divisor: each tick the camera closes `1/follow_speed` of the
    /// distance its target has moved into the border.
    pub follow_speed: f32,
    /// Fraction of the viewport, from each edge, where the target pushes the
    /// camera. Inside the remaining dead zone the camera holds still.
    pub follow_border: f32,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let defaults = EngineConfig::default();
        Self {
            offset: Vec2::ZERO,
            viewport: Vec2::new(viewport_width, viewport_height),
            follow_speed: defaults.follow_speed,
            follow_border: defaults.follow_border,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            offset: Vec2::ZERO,
            viewport: Vec2::new(config.viewport_width, config.viewport_height),
            follow_speed: config.follow_speed,
            follow_border: config.follow_border,
        }
    }

    /// Ease toward a world-screen target point. Call once per tick.
    pub fn follow(&mut self, target: Vec2) {
        self.offset.x = follow_axis(
            self.offset.x,
            target.x,
            self.viewport.x,
            self.follow_border,
            self.follow_speed,
        );
        self.offset.y = follow_axis(
            self.offset.y,
            target.y,
            self.viewport.y,
            self.follow_border,
            self.follow_speed,
        );
    }

    /// Follow an entity by the top-left corner of its sprite.
    pub fn follow_entity(&mut self, entity: &Entity) {
        self.follow(entity.render_pos());
    }

    /// Jump so `target` sits in the middle of the viewport.
    pub fn center_on(&mut self, target: Vec2) {
        self.offset = target - self.viewport * 0.5;
    }

    /// Project a world point to final screen pixels.
    pub fn world_to_screen(&self, world: Vec3) -> Vec2 {
        projection::anchor_to_screen(world) - self.offset
    }

    /// Ground-plane point under a screen pixel, assuming it lies at
    /// elevation `h`. Used for pointer aiming.
    pub fn screen_to_world(&self, screen: Vec2, h: f32) -> Vec2 {
        projection::to_world(screen + self.offset, h)
    }

    /// Resize the viewport (e.g. on window resize). The top-left stays put.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Whether a screen-space rectangle reaches into the viewport grown by
    /// `margin` on every side. Each edge is tested on its own.
    pub fn is_rect_visible(&self, top_left: Vec2, size: Vec2, margin: f32) -> bool {
        let bottom_right = top_left + size;
        bottom_right.x >= -margin
            && top_left.x <= self.viewport.x + margin
            && bottom_right.y >= -margin
            && top_left.y <= self.viewport.y + margin
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

fn follow_axis(offset: f32, target: f32, viewport: f32, border: f32, speed: f32) -> f32 {
    let d = target - offset;
    let b = viewport * border;
    if d < b {
        offset - (b - d) / speed
    } else if d > viewport - b {
        offset + (d - (viewport - b)) / speed
    } else {
        offset
    }
}
