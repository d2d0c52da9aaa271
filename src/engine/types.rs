//! Core identifiers and index-space types.
//!
//! This module defines the **handle types and sentinels** shared by every
//! subsystem of the ECS: the entity handle, component-store ids, listener
//! ids, the dense component-type index, and the signature key that
//! identifies an entity set.
//!
//! ## Design Philosophy
//!
//! The ECS is built around:
//!
//! - **Dense storage** addressed through small integer handles,
//! - **Stable handles** that survive relocation of the values they name,
//! - **Cheap, copyable ids** for all ECS concepts.
//!
//! Handles are plain 32-bit integers wrapped in newtypes so the index
//! spaces cannot be confused: an [`Entity`] indexes the entity table, a
//! [`ComponentId`] indexes exactly one component store, and a
//! [`ListenerId`] indexes one listener table. None of them borrows memory;
//! all are `Copy`.
//!
//! ## Handle recycling
//!
//! Every handle type is allocated by a [`SparseSet`](crate::engine::sparse_set::SparseSet)
//! and recycled LIFO after removal. Holding a handle past removal of the
//! thing it names is a logic error; the public API reports it as a typed
//! error where it can be detected (see [`error`](crate::engine::error)).

use std::fmt;


/// Raw integer type backing an [`Entity`] handle.
pub type EntityId = u32;

/// Dense index identifying a registered component type.
///
/// Assigned by the [`ComponentRegistry`](crate::engine::component::ComponentRegistry)
/// in registration order; always `< component_count` of the owning manager.
pub type ComponentTypeId = u16;

/// Sentinel slot value marking a freed id in a sparse set's
/// id-to-index table.
pub const INVALID_SLOT: u32 = u32::MAX;

/// Ordered list of component-type indices identifying an entity set.
///
/// Order-sensitive: `[Position, Velocity]` and `[Velocity, Position]` are
/// distinct signatures naming distinct sets.
pub type SetSignature = Box<[ComponentTypeId]>;

/// Opaque handle to a live entity.
///
/// ## Representation
/// A dense 32-bit integer drawn from the entity table's id pool. Values
/// are recycled after [`remove_entity`](crate::EntityManager::remove_entity),
/// so two entities alive at different times may compare equal.
///
/// ## Invariants
/// - An `Entity` is valid from the `create_entity` call that returned it
///   until the matching `remove_entity`.
/// - Using a handle past removal is detected by the liveness check at the
///   manager boundary and reported as a dead-entity error.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Entity(EntityId);

impl Entity {
    /// Returns the raw 32-bit value of this handle.
    #[inline]
    pub fn id(self) -> EntityId {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity {}", self.0)
    }
}

/// Opaque handle into a single component store.
///
/// Unique within that store only. NOT stable across store mutation: any
/// insert or erase on the same store may relocate values, so a
/// `ComponentId` must be re-read from the owning entity's data after the
/// store is mutated. For that reason component ids never cross the public
/// API boundary.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ComponentId(u32);

/// Handle to a registered entity-set listener, usable to remove it.
///
/// Listener ids are recycled after removal, like every other handle here.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ListenerId(u32);

/// Conversion between a handle type and the dense index space of the
/// [`SparseSet`](crate::engine::sparse_set::SparseSet) that allocates it.
///
/// Implemented by every id newtype; keeps the container generic without
/// exposing raw integers at its call sites.
pub trait SparseKey: Copy + Eq {
    /// Builds a key from a dense index.
    fn from_index(index: usize) -> Self;

    /// Returns the dense index this key names.
    fn index(self) -> usize;
}

impl SparseKey for Entity {
    #[inline]
    fn from_index(index: usize) -> Self {
        debug_assert!(index < INVALID_SLOT as usize);
        Entity(index as EntityId)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl SparseKey for ComponentId {
    #[inline]
    fn from_index(index: usize) -> Self {
        debug_assert!(index < INVALID_SLOT as usize);
        ComponentId(index as u32)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl SparseKey for ListenerId {
    #[inline]
    fn from_index(index: usize) -> Self {
        debug_assert!(index < INVALID_SLOT as usize);
        ListenerId(index as u32)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}
