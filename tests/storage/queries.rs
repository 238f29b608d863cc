//! Integration tests for query handles and buffers

use sift_foundation::ErrorKind;
use sift_storage::{QueryDesc, World, WorldConfig};

#[derive(Clone, Debug, PartialEq)]
struct Position(i32);

#[derive(Clone, Debug, PartialEq)]
struct Velocity(i32);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Team(u8);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Zone(u8);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Layer(u8);

fn teams() -> World {
    let mut world = World::new();
    for i in 0..6 {
        let team = Team(u8::try_from(i % 3).unwrap());
        world.spawn_with_shared((Position(i),), (team,)).unwrap();
    }
    world.spawn((Position(100), Velocity(1))).unwrap();
    world
}

// =============================================================================
// Matching
// =============================================================================

#[test]
fn count_covers_all_archetypes() {
    let world = teams();
    let query = world.query(QueryDesc::new().with::<Position>());
    assert_eq!(query.calculate_entity_count(), 7);
    assert!(!query.is_empty());
}

#[test]
fn entity_and_component_arrays_align() {
    let world = teams();
    let query = world.query(QueryDesc::new().with::<Position>());
    let entities = query.to_entity_array();
    let positions = query.to_component_array::<Position>().unwrap();

    assert_eq!(entities.len(), positions.len());
    for (entity, position) in entities.iter().zip(positions.iter()) {
        assert_eq!(world.get::<Position>(*entity), Some(position));
    }
}

#[test]
fn component_outside_query_is_rejected() {
    let world = teams();
    let query = world.query(QueryDesc::new().with::<Position>());
    let err = query.to_component_array::<Velocity>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ComponentNotInQuery { .. }));
}

// =============================================================================
// Shared Filters
// =============================================================================

#[test]
fn shared_filter_narrows_and_resets() {
    let world = teams();
    let mut query = world.query(QueryDesc::new().with::<Position>().with_shared::<Team>());
    assert_eq!(query.calculate_entity_count(), 6);

    query.set_shared_filter(&Team(1)).unwrap();
    assert_eq!(query.calculate_entity_count(), 2);
    assert_eq!(query.filter_count(), 1);

    query.set_shared_filter(&Team(2)).unwrap();
    assert_eq!(query.filter_count(), 1);
    assert_eq!(query.calculate_entity_count(), 2);

    query.set_shared_filter(&Team(9)).unwrap();
    assert!(query.is_empty());

    query.reset_filter();
    assert_eq!(query.calculate_entity_count(), 6);
}

#[test]
fn shared_filter_requires_declared_type() {
    let world = teams();
    let mut query = world.query(QueryDesc::new().with::<Position>());
    let err = query.set_shared_filter(&Team(1)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SharedComponentNotInQuery { .. }));
}

#[test]
fn shared_filter_limit_comes_from_config() {
    let mut world = World::with_config(WorldConfig::default().with_max_shared_filters(1));
    world
        .spawn_with_shared((Position(0),), (Team(0), Zone(0), Layer(0)))
        .unwrap();

    let desc = QueryDesc::new()
        .with::<Position>()
        .with_shared::<Team>()
        .with_shared::<Zone>()
        .with_shared::<Layer>();
    let mut query = world.query(desc);
    query.set_shared_filter(&Team(0)).unwrap();
    let err = query.set_shared_filter(&Zone(0)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TooManySharedFilters { limit: 1 }));
}

// =============================================================================
// Singletons
// =============================================================================

#[test]
fn singleton_accessors() {
    let world = teams();
    let query = world.query(QueryDesc::new().with::<Velocity>());
    let entity = query.get_singleton_entity().unwrap();
    assert_eq!(query.get_singleton::<Velocity>().unwrap(), Velocity(1));
    assert_eq!(world.get::<Position>(entity), Some(&Position(100)));

    let many = world.query(QueryDesc::new().with::<Position>());
    let err = many.get_singleton_entity().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SingletonNotUnique { count: 7, .. }));
}

// =============================================================================
// Leases
// =============================================================================

#[test]
fn leases_are_released_on_drop() {
    let world = teams();
    {
        let query = world.query(QueryDesc::new().with::<Position>());
        let entities = query.to_entity_array();
        assert_eq!(world.live_queries(), 1);
        assert_eq!(world.live_buffers(), 1);
        let _ = entities.into_vec();
        assert_eq!(world.live_buffers(), 0);
    }
    assert_eq!(world.live_queries(), 0);
}
