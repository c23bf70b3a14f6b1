/// Stable handle to an entity in the [`Scene`](crate::core::scene::Scene).
///
/// The generation changes every time a slot is reused, so a handle kept
/// after despawn never resolves to the entity that replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    pub index: u32,
    pub generation: u32,
}

impl EntityId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

/// A pair of entities whose collision volumes overlap this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub a: EntityId,
    pub b: EntityId,
}
