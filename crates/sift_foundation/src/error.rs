//! Error types for Sift.
//!
//! Uses `thiserror` for the display and source plumbing.

use thiserror::Error;

use crate::component::ComponentTypeId;
use crate::entity::EntityId;

/// The error type returned by every fallible Sift operation.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// What went wrong.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates an error of the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(id: EntityId) -> Self {
        Self::new(ErrorKind::EntityNotFound(id))
    }

    /// Creates a stale entity reference error.
    #[must_use]
    pub fn stale_entity(id: EntityId) -> Self {
        Self::new(ErrorKind::StaleEntity(id))
    }

    /// Creates a missing component error.
    #[must_use]
    pub fn component_not_found(entity: EntityId, component: ComponentTypeId) -> Self {
        Self::new(ErrorKind::ComponentNotFound { entity, component })
    }

    /// Creates a duplicate component error.
    #[must_use]
    pub fn duplicate_component(component: ComponentTypeId) -> Self {
        Self::new(ErrorKind::DuplicateComponent(component))
    }

    /// Creates an error for a component a query does not cover.
    #[must_use]
    pub fn component_not_in_query(component: ComponentTypeId, query: impl Into<String>) -> Self {
        Self::new(ErrorKind::ComponentNotInQuery {
            component,
            query: query.into(),
        })
    }

    /// Creates an error for a shared component a query does not cover.
    #[must_use]
    pub fn shared_not_in_query(component: ComponentTypeId, query: impl Into<String>) -> Self {
        Self::new(ErrorKind::SharedComponentNotInQuery {
            component,
            query: query.into(),
        })
    }

    /// Creates a shared filter limit error.
    #[must_use]
    pub fn too_many_shared_filters(limit: usize) -> Self {
        Self::new(ErrorKind::TooManySharedFilters { limit })
    }

    /// Creates an error for a singleton query that matched nothing.
    #[must_use]
    pub fn singleton_not_found(query: impl Into<String>) -> Self {
        Self::new(ErrorKind::SingletonNotFound {
            query: query.into(),
        })
    }

    /// Creates an error for a singleton query that matched several entities.
    #[must_use]
    pub fn singleton_not_unique(query: impl Into<String>, count: usize) -> Self {
        Self::new(ErrorKind::SingletonNotUnique {
            query: query.into(),
            count,
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true if this error came from a singleton accessor.
    #[must_use]
    pub fn is_singleton_violation(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::SingletonNotFound { .. } | ErrorKind::SingletonNotUnique { .. }
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Entity was never allocated or its slot is free.
    #[error("entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// Entity handle refers to an earlier occupant of its slot.
    #[error("stale entity reference: {0:?}")]
    StaleEntity(EntityId),

    /// Entity does not carry the requested component.
    #[error("component not found: {component} on entity {entity:?}")]
    ComponentNotFound {
        /// The entity that was accessed.
        entity: EntityId,
        /// The missing component.
        component: ComponentTypeId,
    },

    /// A component type appears twice in one bundle.
    #[error("duplicate component in bundle: {0}")]
    DuplicateComponent(ComponentTypeId),

    /// A query was asked to materialize a component it does not require.
    #[error("component {component} is not part of query {query}")]
    ComponentNotInQuery {
        /// The requested component.
        component: ComponentTypeId,
        /// Description of the query.
        query: String,
    },

    /// A shared filter names a shared component the query does not require.
    #[error("shared component {component} is not part of query {query}")]
    SharedComponentNotInQuery {
        /// The requested shared component.
        component: ComponentTypeId,
        /// Description of the query.
        query: String,
    },

    /// More shared value filters than the world allows.
    #[error("too many shared component filters (limit {limit})")]
    TooManySharedFilters {
        /// The configured limit.
        limit: usize,
    },

    /// Singleton accessor found no matching entity.
    #[error("no entity matches singleton query {query}")]
    SingletonNotFound {
        /// Description of the query.
        query: String,
    },

    /// Singleton accessor found more than one matching entity.
    #[error("{count} entities match singleton query {query}, expected exactly one")]
    SingletonNotUnique {
        /// Description of the query.
        query: String,
        /// Number of matching entities.
        count: usize,
    },

    /// Internal invariant violation (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}
