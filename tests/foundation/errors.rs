//! Integration tests for Error types
//!
//! Tests error construction, display, and error kinds.

use sift_foundation::{ComponentTypeId, EntityId, Error, ErrorKind};

#[derive(Clone)]
struct Health;

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_entity_not_found() {
    let err = Error::entity_not_found(EntityId::new(42, 1));
    assert!(matches!(err.kind, ErrorKind::EntityNotFound(_)));
    assert!(err.to_string().contains("42"));
}

#[test]
fn error_component_not_found() {
    let err = Error::component_not_found(EntityId::new(7, 1), ComponentTypeId::of::<Health>());
    assert!(matches!(err.kind, ErrorKind::ComponentNotFound { .. }));
    assert!(err.to_string().contains("Health"));
}

#[test]
fn error_too_many_shared_filters() {
    let err = Error::too_many_shared_filters(2);
    assert!(matches!(err.kind, ErrorKind::TooManySharedFilters { limit: 2 }));
    assert!(err.to_string().contains("limit 2"));
}

// =============================================================================
// Singleton Errors
// =============================================================================

#[test]
fn singleton_errors_name_the_query() {
    let missing = Error::singleton_not_found("(Health)");
    assert_eq!(missing.to_string(), "no entity matches singleton query (Health)");

    let ambiguous = Error::singleton_not_unique("(Health)", 3);
    assert_eq!(
        ambiguous.to_string(),
        "3 entities match singleton query (Health), expected exactly one"
    );
}

#[test]
fn singleton_violation_classification() {
    assert!(Error::singleton_not_found("q").is_singleton_violation());
    assert!(Error::singleton_not_unique("q", 2).is_singleton_violation());
    assert!(!Error::internal("x").is_singleton_violation());
    assert!(!Error::entity_not_found(EntityId::null()).is_singleton_violation());
}
