//! Entity-vs-entity overlap detection.

use crate::api::types::CollisionPair;
use crate::components::group::EntityGroup;
use crate::core::scene::Scene;

/// Collect every colliding pair between group `a` and group `b` into `out`.
///
/// When `a == b`, each unordered pair inside the group is tested once.
/// Pairs come out in scene order; inactive entities are ignored. The test is
/// [`Entity::collides_with`](crate::components::entity::Entity::collides_with)
/// from the `a` side, whose elevation band uses the `b` entity's height.
pub fn collect_collisions(
    scene: &Scene,
    a: EntityGroup,
    b: EntityGroup,
    out: &mut Vec<CollisionPair>,
) {
    let live = |group| {
        scene
            .group(group)
            .filter(|(_, e)| e.active)
            .collect::<Vec<_>>()
    };
    let left = live(a);
    let right = if a == b { Vec::new() } else { live(b) };

    for (i, &(id_a, ent_a)) in left.iter().enumerate() {
        let others = if a == b { &left[i + 1..] } else { &right[..] };
        for &(id_b, ent_b) in others {
            if ent_a.collides_with(ent_b) {
                out.push(CollisionPair { a: id_a, b: id_b });
            }
        }
    }
}
