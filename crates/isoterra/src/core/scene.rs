use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::group::EntityGroup;

struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// Entity arena with stable generational handles.
/// Designed for small-to-medium entity counts (hundreds, not millions).
///
/// Iteration follows slot order, so two walks over the same scene always
/// visit entities in the same order.
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Add an entity to the scene and return its handle.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entity = Some(entity);
            return EntityId::new(index, slot.generation);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entity: Some(entity),
        });
        EntityId::new(index, 0)
    }

    /// Remove an entity by handle. Returns the removed entity if the handle was live.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let entity = slot.entity.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(entity)
    }

    /// Whether the handle still refers to a live entity.
    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Get a reference to an entity by handle.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entity.as_ref())
    }

    /// Get a mutable reference to an entity by handle.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entity.as_mut())
    }

    /// Iterate over all entities with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.entity
                .as_ref()
                .map(|e| (EntityId::new(index as u32, slot.generation), e))
        })
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Entity)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            slot.entity
                .as_mut()
                .map(|e| (EntityId::new(index as u32, generation), e))
        })
    }

    /// Read-only view of one group.
    pub fn group(&self, group: EntityGroup) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.iter().filter(move |(_, e)| e.group == group)
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<EntityId> {
        self.iter().find(|(_, e)| e.tag == tag).map(|(id, _)| id)
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clear all entities. Outstanding handles stop resolving.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.entity.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.len = 0;
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
