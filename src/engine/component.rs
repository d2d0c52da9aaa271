//! # Component Registry
//!
//! This module assigns stable [`ComponentTypeId`] values to Rust component
//! types for one [`EntityManager`](crate::EntityManager).
//!
//! ## Purpose
//! The registry decouples component type information (`TypeId`, name) from
//! runtime storage, letting the manager address heterogeneous component
//! stores by a dense index instead of by type.
//!
//! ## Design
//! - Component types are registered once and assigned a compact
//!   `ComponentTypeId` in `[0, component_count)`, in registration order.
//! - The registry is **owned by its manager**: no process-global state,
//!   so independent managers (and independent tests) assign indices from
//!   zero without coordinating.
//!
//! ## Invariants
//! - Every entry in `by_type` has a matching `descriptors[index]`.
//! - Indices are always below the configured capacity.
//! - A type's index never changes for the lifetime of the registry.

use std::any::{type_name, TypeId};

use fxhash::FxHashMap;

use crate::engine::error::{RegistryError, RegistryResult};
use crate::engine::types::ComponentTypeId;


/// Describes a registered component type.
///
/// ## Fields
/// - `index`: The dense identifier assigned by the registry.
/// - `name`: The Rust type name (`type_name::<T>()`), for diagnostics.
/// - `type_id`: The runtime `TypeId` of the component.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ComponentDesc {
    /// Dense identifier assigned to this component type.
    pub index: ComponentTypeId,

    /// Rust type name for diagnostics.
    pub name: &'static str,

    /// Runtime `TypeId` of the component.
    pub type_id: TypeId,
}

impl std::fmt::Display for ComponentDesc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ComponentDesc {{ index: {}, name: {} }}", self.index, self.name)
    }
}

/// Mapping between Rust component types and dense `ComponentTypeId`
/// values, owned by one manager.
pub struct ComponentRegistry {
    by_type: FxHashMap<TypeId, ComponentTypeId>,
    descriptors: Vec<ComponentDesc>,
    capacity: usize,
}

impl ComponentRegistry {
    /// Creates a registry that can hold up to `capacity` component types.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            by_type: FxHashMap::default(),
            descriptors: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of registered component types.
    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if no component type has been registered yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Registers component type `T` and returns its assigned index.
    ///
    /// ## Errors
    /// - `AlreadyRegistered` if `T` was registered before.
    /// - `CapacityExceeded` if the configured component count is full.
    pub fn register<T: 'static>(&mut self) -> RegistryResult<ComponentTypeId> {
        let type_id = TypeId::of::<T>();
        if self.by_type.contains_key(&type_id) {
            return Err(RegistryError::AlreadyRegistered { name: type_name::<T>() });
        }
        if self.descriptors.len() >= self.capacity {
            return Err(RegistryError::CapacityExceeded { capacity: self.capacity });
        }

        let index = self.descriptors.len() as ComponentTypeId;
        self.by_type.insert(type_id, index);
        self.descriptors.push(ComponentDesc {
            index,
            name: type_name::<T>(),
            type_id,
        });
        Ok(index)
    }

    /// Returns the index assigned to `T`, if registered.
    #[inline]
    pub fn lookup<T: 'static>(&self) -> Option<ComponentTypeId> {
        self.by_type.get(&TypeId::of::<T>()).copied()
    }

    /// Returns the index assigned to `T`.
    ///
    /// ## Errors
    /// `NotRegistered` if `T` was never registered.
    #[inline]
    pub fn require<T: 'static>(&self) -> RegistryResult<ComponentTypeId> {
        self.lookup::<T>()
            .ok_or(RegistryError::NotRegistered { name: type_name::<T>() })
    }

    /// Returns the descriptor for a registered index.
    #[inline]
    pub fn descriptor(&self, index: ComponentTypeId) -> Option<&ComponentDesc> {
        self.descriptors.get(index as usize)
    }
}
