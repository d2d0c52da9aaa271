//! # Entity manager
//!
//! The façade over the whole runtime: owns the component registry, the
//! component stores, the entity table, and every registered entity set,
//! and implements the update protocol that fans each mutation out to the
//! sets that care about it.
//!
//! ## Update protocol
//! - `add_component` / `remove_component`: mutate the store and the
//!   entity's data, then notify the sets listed in the per-type inverted
//!   index, in registration order.
//! - `remove_entity`: erase every component from its store first, then
//!   broadcast the removal to **all** sets (they self-filter on
//!   membership), then free the handle. The ordering is mandatory: sets
//!   must still be able to resolve their reverse maps while the entity is
//!   being torn down.
//!
//! Control flow never runs from stores back to the manager; only the
//! manager orchestrates fan-out.

use std::any::type_name;

use fxhash::FxHashMap;

use crate::engine::component::ComponentRegistry;
use crate::engine::entity::EntityTable;
use crate::engine::error::{EcsError, EcsResult};
use crate::engine::query::{
    ensure_distinct, ColumnTable, ComponentTuple, EntitySetView, EntitySetViewMut,
};
use crate::engine::sets::{EntitySet, SetEvent};
use crate::engine::storage::{ComponentColumn, ComponentStore};
use crate::engine::types::{ComponentId, ComponentTypeId, Entity, ListenerId, SetSignature};


/// Owner of all ECS state and the only entry point for mutating it.
///
/// Handles ([`Entity`]) are values; references returned by component
/// lookups and set views borrow the manager, so the borrow checker rules
/// out mutation while any of them is alive.
pub struct EntityManager {
    registry: ComponentRegistry,
    stores: ColumnTable,
    entities: EntityTable,
    sets: Vec<EntitySet>,
    set_indices: FxHashMap<SetSignature, usize>,
    type_to_sets: Vec<Vec<usize>>,
}

impl EntityManager {
    /// Creates a manager with room for `component_count` component types.
    pub fn new(component_count: usize) -> Self {
        Self::with_capacity(component_count, 0)
    }

    /// Creates a manager with room for `component_count` component types,
    /// preallocating the set registry for `entity_set_count` sets.
    pub fn with_capacity(component_count: usize, entity_set_count: usize) -> Self {
        Self {
            registry: ComponentRegistry::with_capacity(component_count),
            stores: (0..component_count).map(|_| None).collect(),
            entities: EntityTable::default(),
            sets: Vec::with_capacity(entity_set_count),
            set_indices: FxHashMap::default(),
            type_to_sets: vec![Vec::new(); component_count],
        }
    }

    /// Number of live entities.
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of live `T` instances across all entities.
    ///
    /// ## Errors
    /// `Registry` if `T` was never registered.
    pub fn component_count<T: 'static + Send + Sync>(&self) -> EcsResult<usize> {
        let component_type = self.registry.require::<T>()?;
        Ok(self.stores[component_type as usize]
            .as_deref()
            .expect("registered component type has no installed store")
            .len())
    }

    /// Registers component type `T`, installing its store.
    ///
    /// Must precede any other use of `T` with this manager.
    ///
    /// ## Errors
    /// `Registry` — `T` is already registered, or the component capacity
    /// is exhausted.
    pub fn register_component<T: 'static + Send + Sync>(&mut self) -> EcsResult<()> {
        let index = self.registry.register::<T>()?;
        self.stores[index as usize] = Some(Box::new(ComponentStore::<T>::default()));
        Ok(())
    }

    /// Registers an entity set over the ordered tuple `Q`.
    ///
    /// Idempotent: registering the same signature again is a no-op. A set
    /// registered after entities already exist is seeded by scanning the
    /// entity table, so it is immediately consistent.
    ///
    /// ## Errors
    /// - `Registry` — a tuple member was never registered.
    /// - `AliasedComponent` — a component type repeats in the tuple.
    pub fn register_entity_set<Q: ComponentTuple>(&mut self) -> EcsResult<()> {
        let signature = Q::signature(&self.registry)?;
        ensure_distinct(&self.registry, &signature)?;
        if self.set_indices.contains_key(&signature) {
            return Ok(());
        }

        let set_index = self.sets.len();
        let mut set = EntitySet::new(signature.clone());
        for (entity, data) in self.entities.iter() {
            set.on_entity_updated(entity, data);
        }
        for &component_type in signature.iter() {
            self.type_to_sets[component_type as usize].push(set_index);
        }
        self.sets.push(set);
        self.set_indices.insert(signature, set_index);
        Ok(())
    }

    /// Preallocates room for `additional` entities in the entity table and
    /// every installed component store.
    pub fn reserve(&mut self, additional: usize) {
        self.entities.reserve(additional);
        for store in self.stores.iter_mut().flatten() {
            store.reserve(additional);
        }
    }

    /// Allocates a live entity with no components.
    ///
    /// Handles of removed entities are recycled, so the returned value may
    /// equal one seen before.
    pub fn create_entity(&mut self) -> Entity {
        self.entities.create()
    }

    /// Removes `entity` and every component it carries.
    ///
    /// ## Errors
    /// `DeadEntity` — the handle is stale.
    pub fn remove_entity(&mut self, entity: Entity) -> EcsResult<()> {
        let data = self
            .entities
            .get(entity)
            .ok_or(EcsError::DeadEntity(entity))?;
        // Stores, then every set, then the table. Sets resolve their
        // reverse maps during the broadcast, so the handle must stay
        // allocated until the end.
        for (component_type, component_id) in data.iter() {
            let store = self.stores[component_type as usize]
                .as_deref_mut()
                .expect("live entity references an uninstalled store");
            store.remove(component_id);
        }
        for set in &mut self.sets {
            set.on_entity_removed(entity);
        }
        self.entities.erase(entity);
        Ok(())
    }

    /// Adds a `T` component to `entity`, returning a reference to the
    /// stored value.
    ///
    /// If the entity already carries a `T`, the old instance is replaced;
    /// sets over `T` refresh their cached ids.
    ///
    /// ## Errors
    /// - `Registry` — `T` was never registered.
    /// - `DeadEntity` — the handle is stale.
    pub fn add_component<T: 'static + Send + Sync>(
        &mut self,
        entity: Entity,
        value: T,
    ) -> EcsResult<&mut T> {
        let component_type = self.registry.require::<T>()?;
        if !self.entities.contains(entity) {
            return Err(EcsError::DeadEntity(entity));
        }

        let (component_id, _) = self.store_mut::<T>(component_type).emplace(value);
        let replaced = self
            .entities
            .get_mut(entity)
            .expect("liveness was checked above")
            .insert(component_type, component_id);
        if let Some(old_id) = replaced {
            self.store_mut::<T>(component_type).erase(old_id);
        }
        self.notify_sets(component_type, entity);

        Ok(self
            .store_mut::<T>(component_type)
            .get_mut(component_id)
            .expect("component id was just emplaced"))
    }

    /// Removes the `T` component from `entity`, returning its value.
    ///
    /// ## Errors
    /// - `Registry` — `T` was never registered.
    /// - `DeadEntity` — the handle is stale.
    /// - `MissingComponent` — the entity does not carry `T`.
    pub fn remove_component<T: 'static + Send + Sync>(&mut self, entity: Entity) -> EcsResult<T> {
        let component_type = self.registry.require::<T>()?;
        let data = self
            .entities
            .get_mut(entity)
            .ok_or(EcsError::DeadEntity(entity))?;
        let component_id = data.remove(component_type).ok_or(EcsError::MissingComponent {
            entity,
            component: type_name::<T>(),
        })?;
        let value = self
            .store_mut::<T>(component_type)
            .erase(component_id)
            .expect("entity data referenced a dead component id");
        self.notify_sets(component_type, entity);
        Ok(value)
    }

    /// Returns `true` if `entity` carries a `T` component.
    ///
    /// ## Errors
    /// `Registry` if `T` was never registered, `DeadEntity` if the handle
    /// is stale.
    pub fn has_component<T: 'static + Send + Sync>(&self, entity: Entity) -> EcsResult<bool> {
        let component_type = self.registry.require::<T>()?;
        let data = self
            .entities
            .get(entity)
            .ok_or(EcsError::DeadEntity(entity))?;
        Ok(data.contains(component_type))
    }

    /// Returns `true` if `entity` carries every component in the tuple
    /// `Q`.
    ///
    /// ## Errors
    /// `Registry` if any member was never registered, `DeadEntity` if the
    /// handle is stale.
    pub fn has_components<Q: ComponentTuple>(&self, entity: Entity) -> EcsResult<bool> {
        let signature = Q::signature(&self.registry)?;
        let data = self
            .entities
            .get(entity)
            .ok_or(EcsError::DeadEntity(entity))?;
        Ok(data.contains_all(&signature))
    }

    /// Returns the `T` component of `entity`.
    ///
    /// ## Errors
    /// `Registry`, `DeadEntity`, or `MissingComponent`.
    pub fn get_component<T: 'static + Send + Sync>(&self, entity: Entity) -> EcsResult<&T> {
        let component_type = self.registry.require::<T>()?;
        let data = self
            .entities
            .get(entity)
            .ok_or(EcsError::DeadEntity(entity))?;
        let component_id = data.component_id(component_type).ok_or(EcsError::MissingComponent {
            entity,
            component: type_name::<T>(),
        })?;
        Ok(self
            .store::<T>(component_type)
            .get(component_id)
            .expect("entity data referenced a dead component id"))
    }

    /// Mutable variant of [`get_component`](Self::get_component).
    pub fn get_component_mut<T: 'static + Send + Sync>(
        &mut self,
        entity: Entity,
    ) -> EcsResult<&mut T> {
        let component_type = self.registry.require::<T>()?;
        let data = self
            .entities
            .get(entity)
            .ok_or(EcsError::DeadEntity(entity))?;
        let component_id = data.component_id(component_type).ok_or(EcsError::MissingComponent {
            entity,
            component: type_name::<T>(),
        })?;
        Ok(self
            .store_mut::<T>(component_type)
            .get_mut(component_id)
            .expect("entity data referenced a dead component id"))
    }

    /// Returns references to every component in the tuple `Q` carried by
    /// `entity`, in tuple order.
    ///
    /// ## Errors
    /// `Registry`, `DeadEntity`, or `MissingComponent` for the first
    /// absent member.
    pub fn get_components<Q: ComponentTuple>(&self, entity: Entity) -> EcsResult<Q::Refs<'_>> {
        let signature = Q::signature(&self.registry)?;
        let ids = self.collect_ids(entity, &signature)?;
        let storages = Q::storages(&self.stores, &signature);
        Ok(Q::deref(storages, &ids))
    }

    /// Mutable variant of [`get_components`](Self::get_components).
    ///
    /// ## Errors
    /// Additionally `AliasedComponent` if a type repeats in `Q`.
    pub fn get_components_mut<Q: ComponentTuple>(
        &mut self,
        entity: Entity,
    ) -> EcsResult<Q::Muts<'_>> {
        let signature = Q::signature(&self.registry)?;
        ensure_distinct(&self.registry, &signature)?;
        let ids = self.collect_ids(entity, &signature)?;
        let mut storages = Q::storages_mut(&mut self.stores, &signature);
        // One id per store, stores pairwise distinct.
        Ok(unsafe { Q::deref_mut(&mut storages, &ids) })
    }

    /// Returns a read-only view of the registered set over `Q`.
    ///
    /// ## Errors
    /// `Registry` for unregistered members, `UnknownSignature` if
    /// [`register_entity_set`](Self::register_entity_set) was never called
    /// for this exact ordering.
    pub fn entity_set<Q: ComponentTuple>(&self) -> EcsResult<EntitySetView<'_, Q>> {
        let (signature, set_index) = self.resolve_set::<Q>()?;
        let set = &self.sets[set_index];
        let storages = Q::storages(&self.stores, &signature);
        Ok(EntitySetView::new(set, storages))
    }

    /// Mutable view of the registered set over `Q`; iterating it yields
    /// exclusive component references.
    ///
    /// ## Errors
    /// As [`entity_set`](Self::entity_set).
    pub fn entity_set_mut<Q: ComponentTuple>(&mut self) -> EcsResult<EntitySetViewMut<'_, Q>> {
        let (signature, set_index) = self.resolve_set::<Q>()?;
        let set = &self.sets[set_index];
        let storages = Q::storages_mut(&mut self.stores, &signature);
        Ok(EntitySetViewMut::new(set.entities(), set.component_ids(), storages))
    }

    /// Registers a listener on the set over `Q`; it fires on the given
    /// membership event until removed. Listener ids are reused after
    /// removal.
    ///
    /// ## Errors
    /// As [`entity_set`](Self::entity_set).
    pub fn add_set_listener<Q: ComponentTuple>(
        &mut self,
        event: SetEvent,
        listener: impl FnMut(Entity) + Send + 'static,
    ) -> EcsResult<ListenerId> {
        let (_, set_index) = self.resolve_set::<Q>()?;
        Ok(self.sets[set_index].add_listener(event, Box::new(listener)))
    }

    /// Removes a listener from the set over `Q`. Returns `true` if the id
    /// was live.
    ///
    /// ## Errors
    /// As [`entity_set`](Self::entity_set).
    pub fn remove_set_listener<Q: ComponentTuple>(
        &mut self,
        event: SetEvent,
        listener_id: ListenerId,
    ) -> EcsResult<bool> {
        let (_, set_index) = self.resolve_set::<Q>()?;
        Ok(self.sets[set_index].remove_listener(event, listener_id))
    }

    fn resolve_set<Q: ComponentTuple>(&self) -> EcsResult<(SetSignature, usize)> {
        let signature = Q::signature(&self.registry)?;
        let set_index = *self
            .set_indices
            .get(&signature)
            .ok_or(EcsError::UnknownSignature)?;
        Ok((signature, set_index))
    }

    fn collect_ids(
        &self,
        entity: Entity,
        signature: &[ComponentTypeId],
    ) -> EcsResult<Vec<ComponentId>> {
        let data = self
            .entities
            .get(entity)
            .ok_or(EcsError::DeadEntity(entity))?;
        let mut ids = Vec::with_capacity(signature.len());
        for &component_type in signature {
            let component_id = data.component_id(component_type).ok_or_else(|| {
                EcsError::MissingComponent {
                    entity,
                    component: self
                        .registry
                        .descriptor(component_type)
                        .map(|desc| desc.name)
                        .unwrap_or("<unregistered>"),
                }
            })?;
            ids.push(component_id);
        }
        Ok(ids)
    }

    fn notify_sets(&mut self, component_type: ComponentTypeId, entity: Entity) {
        let data = match self.entities.get(entity) {
            Some(data) => data,
            None => return,
        };
        for &set_index in &self.type_to_sets[component_type as usize] {
            self.sets[set_index].on_entity_updated(entity, data);
        }
    }

    #[inline]
    fn store<T: 'static + Send + Sync>(&self, index: ComponentTypeId) -> &ComponentStore<T> {
        self.stores[index as usize]
            .as_deref()
            .expect("registered component type has no installed store")
            .as_any()
            .downcast_ref::<ComponentStore<T>>()
            .expect("component store does not match its registered type")
    }

    #[inline]
    fn store_mut<T: 'static + Send + Sync>(
        &mut self,
        index: ComponentTypeId,
    ) -> &mut ComponentStore<T> {
        self.stores[index as usize]
            .as_deref_mut()
            .expect("registered component type has no installed store")
            .as_any_mut()
            .downcast_mut::<ComponentStore<T>>()
            .expect("component store does not match its registered type")
    }
}
