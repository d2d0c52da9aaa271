//! # sparse_ecs
//!
//! Sparse-set Entity-Component-System runtime: a data-oriented in-memory
//! store for game and simulation state.
//!
//! ## Design Goals
//! - Densely packed component storage for cache-friendly traversal
//! - O(1) component insertion, lookup, and removal via sparse sets
//! - Incrementally maintained entity sets (cached views over component
//!   signatures) for fast system iteration
//! - Single-threaded, allocation-conscious core with typed errors at the
//!   API boundary
//!
//! ## Quick start
//! ```
//! use sparse_ecs::prelude::*;
//!
//! struct Position { x: f32, y: f32 }
//! struct Velocity { x: f32, y: f32 }
//!
//! # fn main() -> sparse_ecs::EcsResult<()> {
//! let mut manager = EntityManager::new(32);
//! manager.register_component::<Position>()?;
//! manager.register_component::<Velocity>()?;
//! manager.register_entity_set::<(Position, Velocity)>()?;
//!
//! let entity = manager.create_entity();
//! manager.add_component(entity, Position { x: 0.0, y: 0.0 })?;
//! manager.add_component(entity, Velocity { x: 1.0, y: 1.0 })?;
//!
//! for (_entity, (position, velocity)) in manager.entity_set_mut::<(Position, Velocity)>()? {
//!     position.x += velocity.x;
//!     position.y += velocity.y;
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![deny(dead_code)]

pub mod engine;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (Public API)
// ─────────────────────────────────────────────────────────────────────────────

// Core ECS types

pub use engine::manager::EntityManager;

pub use engine::types::{
    Entity,
    EntityId,
    ComponentTypeId,
    ListenerId,
};

pub use engine::sets::SetEvent;

pub use engine::query::{
    ComponentTuple,
    EntitySetView,
    EntitySetViewMut,
    EntitySetIter,
    EntitySetIterMut,
};

pub use engine::sparse_set::SparseSet;

pub use engine::error::{
    EcsResult,
    EcsError,
    RegistryError,
};

// ─────────────────────────────────────────────────────────────────────────────
// Prelude (Optional but recommended)
// ─────────────────────────────────────────────────────────────────────────────

/// Commonly used ECS types.
///
/// Import with:
/// ```rust
/// use sparse_ecs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        EntityManager,
        Entity,
        SetEvent,
        EcsResult,
        EcsError,
    };
}
