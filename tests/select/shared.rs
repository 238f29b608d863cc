//! Integration tests for shared component requirements

use sift_foundation::ErrorKind;
use sift_select::prelude::*;
use sift_storage::{World, WorldConfig};

use crate::common::{A, Tagged, Team, Zone, shared_world};

#[test]
fn single_filter() {
    let (world, ids) = shared_world();
    let team_one = world
        .select::<(A,)>()
        .shared(Shared::Match(Team(1)))
        .entities()
        .unwrap();
    assert_eq!(team_one, vec![ids[0], ids[1]]);
}

#[test]
fn two_filters_combine() {
    let (world, ids) = shared_world();
    let selector = world
        .select::<(A,)>()
        .shared(Shared::Match(Team(2)))
        .shared(Shared::Match(Zone(1)));
    assert_eq!(selector.singleton_entity().unwrap(), ids[2]);
    assert_eq!(selector.singleton().unwrap(), (A(3),));
}

#[test]
fn filters_combine_with_predicate_and_tags() {
    let (world, ids) = shared_world();
    let selector = world
        .select::<(A,)>()
        .with::<(Tagged,)>()
        .shared(Shared::Match(Zone(2)));
    assert_eq!(selector.entities_where(|(a,)| a.0 > 3).unwrap(), vec![ids[3]]);
    assert!(selector.entities_where(|(a,)| a.0 < 3).unwrap().is_empty());
}

#[test]
fn tag_requires_type_without_filtering() {
    let (world, _) = shared_world();
    let tagged = world
        .select::<(A,)>()
        .shared(Shared::<Team>::Tag)
        .entities()
        .unwrap();
    assert_eq!(tagged.len(), 4);

    let via_store = world
        .query(sift_storage::QueryDesc::new().with::<A>().with_shared::<Team>())
        .to_entity_array()
        .into_vec();
    assert_eq!(tagged, via_store);
}

#[test]
fn tag_and_match_mix() {
    let (world, ids) = shared_world();
    let picked = world
        .select::<(A,)>()
        .shared(Shared::<Team>::any())
        .shared(Shared::matching(Zone(1)))
        .entities()
        .unwrap();
    assert_eq!(picked, vec![ids[0], ids[2]]);
}

#[test]
fn unknown_value_matches_nothing() {
    let (world, _) = shared_world();
    let count = world
        .select::<(A,)>()
        .shared(Shared::Match(Team(42)))
        .entity_count()
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn filter_limit_surfaces_store_error() {
    let world = World::with_config(WorldConfig::default().with_max_shared_filters(0));
    let err = world
        .select::<(A,)>()
        .shared(Shared::Match(Team(1)))
        .entity_count()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TooManySharedFilters { limit: 0 }));
    assert_eq!(world.live_queries(), 0);
}

#[test]
fn selection_sees_later_shared_changes() {
    let (mut world, ids) = shared_world();
    world.set_shared(ids[4], Team(1)).unwrap();

    let team_one = world
        .select::<(A,)>()
        .shared(Shared::Match(Team(1)))
        .entities()
        .unwrap();
    assert_eq!(team_one.len(), 3);
    assert!(team_one.contains(&ids[4]));
}
