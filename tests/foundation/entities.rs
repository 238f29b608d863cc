//! Integration tests for EntityId

use std::collections::HashSet;

use sift_foundation::EntityId;

#[test]
fn null_is_default() {
    assert_eq!(EntityId::default(), EntityId::null());
    assert!(EntityId::null().is_null());
    assert!(!EntityId::new(0, 1).is_null());
}

#[test]
fn generation_distinguishes_ids() {
    let old = EntityId::new(3, 1);
    let new = EntityId::new(3, 3);
    assert_ne!(old, new);

    let set: HashSet<_> = [old, new, old].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn formatting() {
    let id = EntityId::new(12, 5);
    assert_eq!(format!("{id:?}"), "EntityId(12v5)");
    assert_eq!(format!("{id}"), "Entity(12)");
    assert_eq!(format!("{}", EntityId::null()), "Entity(null)");
}
