//! # Entity table
//!
//! This module defines entity identity, lifecycle, and the per-entity
//! component bookkeeping used by the manager.
//!
//! ## Purpose
//! Entities are lightweight, opaque identifiers. This module is
//! responsible for:
//!
//! - Allocating and recycling [`Entity`] handles,
//! - Associating each live entity with its component map
//!   (`component type → component id`),
//! - O(1) liveness checks.
//!
//! ## Design
//! The table is a [`SparseSet`] keyed by `Entity`, so handle allocation,
//! recycling, and dense iteration come from the same primitive that backs
//! component storage. The per-entity map is a short vector of pairs: an
//! entity carries few components, so a linear scan beats hashing.
//!
//! ## Invariants
//! - An entity is live iff its handle is live in the underlying sparse set.
//! - Every `(type, component id)` pair in a live entity's data names a
//!   live instance in that type's store (maintained by the manager).
//! - Removing an entity frees its handle for reuse; the recycled handle
//!   starts with empty data.

use crate::engine::sparse_set::SparseSet;
use crate::engine::types::{ComponentId, ComponentTypeId, Entity};


/// Per-entity component bookkeeping: which component types this entity
/// carries, and the id of each instance in its store.
///
/// Absence of a type means the entity lacks that component.
#[derive(Default)]
pub struct EntityData {
    components: Vec<(ComponentTypeId, ComponentId)>,
}

impl EntityData {
    /// Returns the component id recorded for `component_type`, if any.
    #[inline]
    pub fn component_id(&self, component_type: ComponentTypeId) -> Option<ComponentId> {
        self.components
            .iter()
            .find(|(t, _)| *t == component_type)
            .map(|(_, id)| *id)
    }

    /// Returns `true` if the entity carries `component_type`.
    #[inline]
    pub fn contains(&self, component_type: ComponentTypeId) -> bool {
        self.components.iter().any(|(t, _)| *t == component_type)
    }

    /// Returns `true` if the entity carries every type in `component_types`.
    #[inline]
    pub fn contains_all(&self, component_types: &[ComponentTypeId]) -> bool {
        component_types.iter().all(|&t| self.contains(t))
    }

    /// Records `component_id` for `component_type`, returning the id it
    /// replaced if the type was already present.
    pub fn insert(
        &mut self,
        component_type: ComponentTypeId,
        component_id: ComponentId,
    ) -> Option<ComponentId> {
        for (t, id) in &mut self.components {
            if *t == component_type {
                return Some(std::mem::replace(id, component_id));
            }
        }
        self.components.push((component_type, component_id));
        None
    }

    /// Removes the entry for `component_type`, returning the recorded id
    /// so the caller can erase it from the store.
    pub fn remove(&mut self, component_type: ComponentTypeId) -> Option<ComponentId> {
        let position = self.components.iter().position(|(t, _)| *t == component_type)?;
        let (_, component_id) = self.components.swap_remove(position);
        Some(component_id)
    }

    /// Iterates the `(type, component id)` pairs this entity carries.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (ComponentTypeId, ComponentId)> + '_ {
        self.components.iter().copied()
    }

    /// Number of components this entity carries.
    #[inline]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if the entity carries no components.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Allocates entity handles and stores each live entity's
/// [`EntityData`].
#[derive(Default)]
pub struct EntityTable {
    entities: SparseSet<Entity, EntityData>,
}

impl EntityTable {
    /// Allocates a live entity with no components.
    ///
    /// Freed handles are reused LIFO, so the returned value may equal a
    /// previously removed entity.
    pub fn create(&mut self) -> Entity {
        let (entity, _) = self.entities.emplace(EntityData::default());
        entity
    }

    /// Removes `entity`, returning its data. The handle becomes reusable.
    pub fn erase(&mut self, entity: Entity) -> Option<EntityData> {
        self.entities.erase(entity)
    }

    /// Returns the data of `entity`, if live.
    #[inline]
    pub fn get(&self, entity: Entity) -> Option<&EntityData> {
        self.entities.get(entity)
    }

    /// Mutable variant of [`get`](Self::get).
    #[inline]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut EntityData> {
        self.entities.get_mut(entity)
    }

    /// Returns `true` if `entity` is live.
    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.has(entity)
    }

    /// Preallocates room for `additional` further entities.
    pub fn reserve(&mut self, additional: usize) {
        self.entities.reserve(additional);
    }

    /// Number of live entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no entity is live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates `(entity, data)` for every live entity, in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &EntityData)> {
        self.entities.iter()
    }
}
