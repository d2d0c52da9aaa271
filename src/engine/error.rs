//! Error types for the entity manager's public surface.
//!
//! This module declares focused, composable error types for every
//! precondition the API can detect. Each error carries enough context to
//! make failures actionable while remaining small and cheap to pass around
//! or convert into the aggregate [`EcsError`].
//!
//! ## Goals
//! * **Specificity:** Each variant models a single failure mode (stale
//!   entity handles, unregistered component types, absent components,
//!   unknown set signatures).
//! * **Ergonomics:** All errors implement [`std::error::Error`] and
//!   [`fmt::Display`], and provide `From<T>` conversions into
//!   [`EcsError`] so call sites can use `?` throughout.
//! * **Actionability:** Structured fields (the offending entity, the
//!   component type name, the capacity that was exceeded) make failures
//!   diagnosable without reproducing them.
//!
//! ## Typical flow
//! Registry operations return [`RegistryError`]; manager operations bubble
//! those and their own precondition failures into [`EcsError`] via `?`.
//! Internal invariant violations are *not* represented here; those are
//! defects, checked with assertions inside the storage layer.
//!
//! ## Display vs. Debug
//! * [`fmt::Display`] is optimized for operator logs (short, imperative
//!   phrasing).
//! * [`fmt::Debug`] (derived) retains full structure for diagnostics.

use std::fmt;

use crate::engine::types::Entity;


/// Result alias used across the manager's public surface.
pub type EcsResult<T> = Result<T, EcsError>;

/// Result alias for component-registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Failures raised while registering or resolving component types.
///
/// ### Variants
/// * `CapacityExceeded` — registration would exceed the component count
///   the manager was constructed with.
/// * `AlreadyRegistered` — `register_component` was called twice for the
///   same type.
/// * `NotRegistered` — a component type was used before its
///   `register_component` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// Registration would exceed the configured component capacity.
    CapacityExceeded {
        /// Component-type capacity the manager was constructed with.
        capacity: usize,
    },

    /// The component type is already registered.
    AlreadyRegistered {
        /// Rust type name of the offending component.
        name: &'static str,
    },

    /// The component type was never registered.
    NotRegistered {
        /// Rust type name of the offending component.
        name: &'static str,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::CapacityExceeded { capacity } => {
                write!(f, "component capacity reached ({capacity} types)")
            }
            RegistryError::AlreadyRegistered { name } => {
                write!(f, "component type {name} is already registered")
            }
            RegistryError::NotRegistered { name } => {
                write!(f, "component type {name} was never registered")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Aggregate error for entity-manager operations.
///
/// Every public operation that has a caller-side precondition returns
/// `EcsResult<_>` with one of these variants instead of asserting, so the
/// caller can match on the failure or log it with a readable message.
///
/// ### Usage
/// `From<RegistryError>` allows `?` from registry lookups:
/// ```ignore
/// fn position_of(manager: &EntityManager, entity: Entity) -> EcsResult<(f32, f32)> {
///     let position = manager.get_component::<Position>(entity)?;
///     Ok((position.x, position.y))
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcsError {
    /// The entity handle refers to a removed or never-created entity.
    DeadEntity(Entity),

    /// The entity does not currently carry the requested component.
    MissingComponent {
        /// Entity the lookup targeted.
        entity: Entity,

        /// Rust type name of the requested component.
        component: &'static str,
    },

    /// No entity set is registered for the requested signature.
    UnknownSignature,

    /// The same component type appears more than once in a tuple that
    /// requires pairwise-distinct members (mutable access, set
    /// signatures).
    AliasedComponent {
        /// Rust type name of the repeated component.
        component: &'static str,
    },

    /// A component-registry operation failed.
    Registry(RegistryError),
}

impl fmt::Display for EcsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcsError::DeadEntity(entity) => {
                write!(f, "stale or dead entity reference ({entity})")
            }
            EcsError::MissingComponent { entity, component } => {
                write!(f, "{entity} has no {component} component")
            }
            EcsError::UnknownSignature => {
                f.write_str("no entity set registered for this signature")
            }
            EcsError::AliasedComponent { component } => {
                write!(f, "component type {component} appears more than once in the tuple")
            }
            EcsError::Registry(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EcsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EcsError::Registry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RegistryError> for EcsError {
    fn from(e: RegistryError) -> Self {
        EcsError::Registry(e)
    }
}
