//! Advances every active entity's current animation once per tick.

use crate::core::scene::Scene;

/// Advance all active entity animations by one tick.
///
/// Call this once per tick after physics. Entities that should hold still
/// (an idle player) rewind their animation from game code instead.
pub fn tick_animations(scene: &mut Scene) {
    for (_, entity) in scene.iter_mut() {
        if entity.active {
            entity.advance_animation();
        }
    }
}
