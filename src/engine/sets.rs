//! # Entity sets
//!
//! A materialized view over all entities possessing a fixed ordered tuple
//! of component types, kept incrementally in sync by the manager on every
//! component add/remove and entity removal.
//!
//! ## Purpose
//! Systems iterate entity sets instead of scanning the entity table: the
//! set caches, per managed entity, the component ids of every tuple
//! member, so traversal composes a dense sweep with k O(1) store lookups.
//!
//! ## Design
//! The set state is type-erased: an ordered signature of component-type
//! indices, a dense entity vector, and a flat component-id vector with
//! one signature-length block per entity. Typed iteration lives in
//! [`query`](crate::engine::query), which pairs this state with downcast
//! store references.
//!
//! ## Invariants
//! - `entity ∈ slots ⇔ entity is live and carries every signature type`.
//! - `slots[entity] == i ⇔ entities[i] == entity`.
//! - `component_ids.len() == entities.len() * signature.len()`, and block
//!   `i` holds the current ids of `entities[i]`'s tuple components, in
//!   signature order.
//!
//! Membership mutation swap-pops, so dense order is not stable.

use fxhash::FxHashMap;

use crate::engine::entity::EntityData;
use crate::engine::sparse_set::SparseSet;
use crate::engine::types::{ComponentId, ComponentTypeId, Entity, ListenerId, SetSignature};


/// Callback fired when an entity enters or leaves a set.
pub type EntityListener = Box<dyn FnMut(Entity) + Send>;

/// Which of a set's listener tables an id belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SetEvent {
    /// Fired after an entity is added to the set.
    EntityAdded,
    /// Fired before an entity is removed from the set.
    EntityRemoved,
}

/// Runtime state of one registered entity set.
///
/// Driven exclusively by the manager; user code observes it through the
/// typed views in [`query`](crate::engine::query) and through listeners.
pub struct EntitySet {
    signature: SetSignature,
    entities: Vec<Entity>,
    component_ids: Vec<ComponentId>,
    slots: FxHashMap<Entity, usize>,
    added_listeners: SparseSet<ListenerId, EntityListener>,
    removed_listeners: SparseSet<ListenerId, EntityListener>,
}

impl EntitySet {
    /// Creates an empty set over `signature`.
    pub fn new(signature: SetSignature) -> Self {
        Self {
            signature,
            entities: Vec::new(),
            component_ids: Vec::new(),
            slots: FxHashMap::default(),
            added_listeners: SparseSet::new(),
            removed_listeners: SparseSet::new(),
        }
    }

    /// The ordered component-type signature identifying this set.
    #[inline]
    pub fn signature(&self) -> &[ComponentTypeId] {
        &self.signature
    }

    /// Number of entities currently in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no entity satisfies the signature.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The managed entities, densely packed.
    #[inline]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Flat cached component ids, one signature-length block per entity.
    #[inline]
    pub fn component_ids(&self) -> &[ComponentId] {
        &self.component_ids
    }

    /// Returns `true` if `entity` is currently in the set.
    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.slots.contains_key(&entity)
    }

    /// Reconciles membership of a live entity after one of its components
    /// changed.
    ///
    /// Transition table on (satisfies signature, already managed):
    /// - (true, false) → add;
    /// - (false, true) → remove;
    /// - (true, true) → refresh the cached component ids; the triggering
    ///   change may have replaced a tuple member, invalidating its id;
    /// - (false, false) → no-op.
    pub fn on_entity_updated(&mut self, entity: Entity, data: &EntityData) {
        let satisfied = data.contains_all(&self.signature);
        match (satisfied, self.slots.get(&entity).copied()) {
            (true, None) => self.add(entity, data),
            (false, Some(_)) => self.remove(entity),
            (true, Some(slot)) => self.refresh(slot, data),
            (false, None) => {}
        }
    }

    /// Drops `entity` from the set if present. Called on entity removal,
    /// which is broadcast to every set.
    pub fn on_entity_removed(&mut self, entity: Entity) {
        if self.slots.contains_key(&entity) {
            self.remove(entity);
        }
    }

    /// Registers a listener for `event`; the returned id deregisters it.
    pub fn add_listener(&mut self, event: SetEvent, listener: EntityListener) -> ListenerId {
        let table = match event {
            SetEvent::EntityAdded => &mut self.added_listeners,
            SetEvent::EntityRemoved => &mut self.removed_listeners,
        };
        let (listener_id, _) = table.emplace(listener);
        listener_id
    }

    /// Removes a listener previously registered for `event`. Returns
    /// `true` if the id was live.
    pub fn remove_listener(&mut self, event: SetEvent, listener_id: ListenerId) -> bool {
        let table = match event {
            SetEvent::EntityAdded => &mut self.added_listeners,
            SetEvent::EntityRemoved => &mut self.removed_listeners,
        };
        table.erase(listener_id).is_some()
    }

    fn add(&mut self, entity: Entity, data: &EntityData) {
        let slot = self.entities.len();
        self.entities.push(entity);
        for &component_type in self.signature.iter() {
            let component_id = data
                .component_id(component_type)
                .expect("satisfied entity is missing a signature component");
            self.component_ids.push(component_id);
        }
        self.slots.insert(entity, slot);
        for listener in self.added_listeners.values_mut() {
            listener(entity);
        }
    }

    fn remove(&mut self, entity: Entity) {
        for listener in self.removed_listeners.values_mut() {
            listener(entity);
        }
        let slot = self
            .slots
            .remove(&entity)
            .expect("removed an entity the set does not manage");
        let last = self.entities.len() - 1;
        self.entities.swap_remove(slot);

        let stride = self.signature.len();
        if slot != last {
            let (head, tail) = self.component_ids.split_at_mut(last * stride);
            head[slot * stride..(slot + 1) * stride].copy_from_slice(&tail[..stride]);
            self.slots.insert(self.entities[slot], slot);
        }
        self.component_ids.truncate(last * stride);
    }

    fn refresh(&mut self, slot: usize, data: &EntityData) {
        let stride = self.signature.len();
        let block = &mut self.component_ids[slot * stride..(slot + 1) * stride];
        for (cached, &component_type) in block.iter_mut().zip(self.signature.iter()) {
            *cached = data
                .component_id(component_type)
                .expect("satisfied entity is missing a signature component");
        }
    }
}
