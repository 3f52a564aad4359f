//! World Module
//!
//! The World is the sole owner of all entity and component data: the
//! generational entity registry, one storage backend per component type,
//! singleton resources, and the per-invocation event queue. No other
//! structure holds component data independently.
//!
//! ## Module Structure
//!
//! - `entity`: generational slot arena and `EntityId` handles
//! - `component`: component trait, type tags, byte layouts
//! - `storage`: table (dense) and sparse backends
//!
//! Keyed collections are `BTreeMap`s so iteration, and therefore hashing,
//! is deterministic.

pub mod component;
pub mod entity;
pub mod storage;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::contract::Error;
use crate::core::hash::StateHasher;
use crate::game::events::GameEvent;

pub use component::{Component, Health, Position, Tick, TypeTag};
pub use entity::{EntityId, EntityRegistry, Liveness};
pub use storage::{ComponentStore, StorageKind};

/// The owning container for all entities, components, and resources.
///
/// Constructed at invocation start from persisted state, mutated through
/// entry points, and persisted explicitly before return. Never a
/// module-level global.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct World {
    registry: EntityRegistry,
    /// One store per registered component type.
    stores: BTreeMap<TypeTag, ComponentStore>,
    /// Singleton type-tagged values held outside any entity.
    resources: BTreeMap<TypeTag, Vec<u8>>,
    /// Events generated this invocation (not persisted).
    #[serde(skip)]
    pending_events: Vec<GameEvent>,
}

impl World {
    /// Create an empty world with the built-in component types registered.
    ///
    /// Position and health are near-universal, so they get table storage.
    pub fn new() -> Self {
        let mut world = Self {
            registry: EntityRegistry::new(),
            stores: BTreeMap::new(),
            resources: BTreeMap::new(),
            pending_events: Vec::new(),
        };
        world.register_component::<Position>(StorageKind::Table);
        world.register_component::<Health>(StorageKind::Table);
        world
    }

    /// Register a component type with the given backend.
    ///
    /// Registration is idempotent; a type registered twice keeps its first
    /// backend so the space/time choice can never flip mid-lifetime.
    pub fn register_component<C: Component>(&mut self, kind: StorageKind) {
        let _ = self
            .stores
            .entry(C::TYPE_TAG)
            .or_insert_with(|| ComponentStore::new(kind));
    }

    // =========================================================================
    // ENTITY LIFECYCLE
    // =========================================================================

    /// Spawn an entity holding the given component payloads.
    pub fn spawn(&mut self, components: Vec<(TypeTag, Vec<u8>)>) -> EntityId {
        let id = self.registry.allocate();
        for (tag, payload) in components {
            self.store_mut(tag).set(id.index, payload);
        }
        debug!(index = id.index, generation = id.generation, "spawned entity");
        self.pending_events.push(GameEvent::EntitySpawned { id });
        id
    }

    /// Despawn an entity.
    ///
    /// Returns false when the handle is unknown or already dead. Every
    /// component slot for the index is cleared in every backend before the
    /// index is recycled; a leftover payload would surface as stale data on
    /// the slot's next occupant.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        if !self.registry.is_alive(id) {
            return false;
        }
        for store in self.stores.values_mut() {
            let _ = store.remove(id.index);
        }
        let released = self.registry.release(id);
        debug_assert!(released);
        debug!(index = id.index, generation = id.generation, "despawned entity");
        self.pending_events.push(GameEvent::EntityDespawned { id });
        true
    }

    /// Check that a handle refers to the current, alive occupant of its slot.
    pub fn ensure_alive(&self, id: EntityId) -> Result<(), Error> {
        match self.registry.liveness(id) {
            Liveness::Alive => Ok(()),
            Liveness::Dead => Err(Error::EntityDead),
            Liveness::Unknown => Err(Error::InvalidEntity),
        }
    }

    // =========================================================================
    // COMPONENT ACCESS
    // =========================================================================

    /// Attach or replace a typed component on an alive entity.
    pub fn add_component<C: Component>(
        &mut self,
        id: EntityId,
        component: &C,
    ) -> Result<(), Error> {
        self.add_component_raw(id, C::TYPE_TAG, component.encode())
    }

    /// Attach or replace a raw component payload on an alive entity.
    pub fn add_component_raw(
        &mut self,
        id: EntityId,
        tag: TypeTag,
        payload: Vec<u8>,
    ) -> Result<(), Error> {
        self.ensure_alive(id)?;
        self.store_mut(tag).set(id.index, payload);
        Ok(())
    }

    /// Read a typed component from an alive entity.
    ///
    /// `None` for stale or dead handles as well as for absent components:
    /// liveness is checked first so a stale handle can never read the data
    /// of the slot's next occupant.
    pub fn get_component<C: Component>(&self, id: EntityId) -> Option<C> {
        self.get_component_raw(id, C::TYPE_TAG).and_then(C::decode)
    }

    /// Read a raw component payload from an alive entity.
    pub fn get_component_raw(&self, id: EntityId, tag: TypeTag) -> Option<&[u8]> {
        if !self.registry.is_alive(id) {
            return None;
        }
        self.stores.get(&tag)?.get(id.index)
    }

    /// Remove a component from an alive entity. Returns whether it was held.
    pub fn remove_component(&mut self, id: EntityId, tag: TypeTag) -> Result<bool, Error> {
        self.ensure_alive(id)?;
        Ok(self
            .stores
            .get_mut(&tag)
            .map(|store| store.remove(id.index))
            .unwrap_or(false))
    }

    /// Entities holding *all* listed component types, ascending by index.
    ///
    /// An empty type set matches every alive entity.
    pub fn query_entities(&self, tags: &[TypeTag]) -> Vec<EntityId> {
        self.registry
            .iter_alive()
            .filter(|id| {
                tags.iter().all(|tag| {
                    self.stores
                        .get(tag)
                        .is_some_and(|store| store.contains(id.index))
                })
            })
            .collect()
    }

    fn store_mut(&mut self, tag: TypeTag) -> &mut ComponentStore {
        // Types that were never registered explicitly are by definition
        // occasional; they fall back to sparse storage.
        self.stores
            .entry(tag)
            .or_insert_with(|| ComponentStore::new(StorageKind::Sparse))
    }

    // =========================================================================
    // RESOURCES
    // =========================================================================

    /// Set the singleton resource for a type, replacing any previous value.
    pub fn set_resource<C: Component>(&mut self, value: &C) {
        let _ = self.resources.insert(C::TYPE_TAG, value.encode());
    }

    /// Read the singleton resource for a type.
    pub fn get_resource<C: Component>(&self) -> Option<C> {
        self.resources.get(&C::TYPE_TAG).and_then(|p| C::decode(p))
    }

    /// Increment the invocation tick resource and return the new value.
    pub fn advance_tick(&mut self) -> u64 {
        let tick = self.get_resource::<Tick>().unwrap_or_default();
        let next = Tick(tick.0.wrapping_add(1));
        self.set_resource(&next);
        next.0
    }

    // =========================================================================
    // COUNTERS / EVENTS / HASHING
    // =========================================================================

    /// Number of alive entities.
    pub fn live_count(&self) -> u32 {
        self.registry.live_count()
    }

    /// Number of despawned entities awaiting slot recycling.
    pub fn dead_count(&self) -> u32 {
        self.registry.dead_count()
    }

    /// Number of entity indices ever allocated.
    pub fn allocated(&self) -> u32 {
        self.registry.allocated()
    }

    /// Append an event to the per-invocation queue.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Feed the full world state into a hasher, in a fixed order.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.registry.allocated());
        hasher.update_u32(self.registry.live_count());
        hasher.update_u32(self.registry.dead_count());
        for (generation, alive) in self.registry.slot_states() {
            hasher.update_u32(generation);
            hasher.update_bool(alive);
        }
        for (tag, store) in &self.stores {
            hasher.update_u16(*tag);
            hasher.update_u64(store.len() as u64);
            for (index, payload) in store.iter() {
                hasher.update_u32(index);
                hasher.update_blob(payload);
            }
        }
        for (tag, payload) in &self.resources {
            hasher.update_u16(*tag);
            hasher.update_blob(payload);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
