//! Generational Entity Registry
//!
//! Entities are handles into a slot arena: `(index, generation)`. An index
//! is recycled after despawn, and the generation is bumped when that happens,
//! so a stale handle from before the despawn can never alias the slot's next
//! occupant.

use serde::{Deserialize, Serialize};

/// Unique identifier for an entity across its lifetime.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EntityId {
    /// Slot index in the registry arena. May be reused after despawn.
    pub index: u32,
    /// Reuse counter for the slot. A handle is valid only while its
    /// generation matches the slot's current one.
    pub generation: u32,
}

impl EntityId {
    /// Create a handle from raw parts.
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

/// Liveness of a handle relative to the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Liveness {
    /// Handle refers to the slot's current, alive occupant.
    Alive,
    /// Handle refers to the slot's current occupant, which has been
    /// despawned and not yet recycled.
    Dead,
    /// Handle's index was never allocated, or its generation no longer
    /// matches the slot (the index has been recycled since).
    Unknown,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct EntitySlot {
    generation: u32,
    alive: bool,
}

/// Slot arena mapping indices to generations and alive flags.
///
/// Invariant: `live_count + dead_count` equals the number of slots ever
/// allocated. A despawn moves a slot from live to dead; a spawn that
/// recycles a dead slot moves it back.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EntityRegistry {
    slots: Vec<EntitySlot>,
    /// Dead indices available for reuse.
    free: Vec<u32>,
    live_count: u32,
    dead_count: u32,
}

impl EntityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a slot, recycling a dead index if one is available.
    ///
    /// Recycling bumps the slot's generation; until then a dead slot keeps
    /// the generation of its last occupant, so that occupant's handle still
    /// identifies it as dead rather than unknown.
    pub fn allocate(&mut self) -> EntityId {
        self.live_count += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.alive = true;
            self.dead_count -= 1;
            return EntityId::new(index, slot.generation);
        }
        let index = self.slots.len() as u32;
        self.slots.push(EntitySlot {
            generation: 0,
            alive: true,
        });
        EntityId::new(index, 0)
    }

    /// Mark a slot dead and queue its index for reuse.
    ///
    /// Returns false when the handle is not the slot's current, alive
    /// occupant.
    pub fn release(&mut self, id: EntityId) -> bool {
        if self.liveness(id) != Liveness::Alive {
            return false;
        }
        self.slots[id.index as usize].alive = false;
        self.free.push(id.index);
        self.live_count -= 1;
        self.dead_count += 1;
        true
    }

    /// Classify a handle against the current slot state.
    pub fn liveness(&self, id: EntityId) -> Liveness {
        match self.slots.get(id.index as usize) {
            Some(slot) if slot.generation == id.generation => {
                if slot.alive {
                    Liveness::Alive
                } else {
                    Liveness::Dead
                }
            }
            _ => Liveness::Unknown,
        }
    }

    /// Is this handle the slot's current, alive occupant?
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.liveness(id) == Liveness::Alive
    }

    /// Number of alive entities.
    pub fn live_count(&self) -> u32 {
        self.live_count
    }

    /// Number of despawned entities whose slots await recycling.
    pub fn dead_count(&self) -> u32 {
        self.dead_count
    }

    /// Number of indices ever allocated.
    pub fn allocated(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Iterate `(generation, alive)` for every slot in index order.
    ///
    /// Dead slots are included: their generations are part of observable
    /// state (they decide which stale handles are rejected).
    pub fn slot_states(&self) -> impl Iterator<Item = (u32, bool)> + '_ {
        self.slots.iter().map(|slot| (slot.generation, slot.alive))
    }

    /// Iterate alive entities in ascending index order.
    pub fn iter_alive(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.alive
                .then(|| EntityId::new(index as u32, slot.generation))
        })
    }
}
