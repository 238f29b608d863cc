//! Integration tests for entity and component lists

use proptest::prelude::*;
use sift_select::prelude::*;
use sift_storage::World;

use crate::common::{A, B, Tagged, abc_world};

#[test]
fn scenario_entities_with_predicate() {
    let (world, ids) = abc_world();
    let picked = world
        .select::<(A,)>()
        .with::<(B,)>()
        .entities_where(|(a,)| a.0 > 1)
        .unwrap();
    assert_eq!(picked, vec![ids[1], ids[2]]);
}

#[test]
fn entities_without_predicate_follow_storage_order() {
    let (world, ids) = abc_world();
    assert_eq!(world.select::<(A,)>().entities().unwrap(), ids);
}

#[test]
fn components_are_copies() {
    let (mut world, ids) = abc_world();
    let before = world.select::<(A, B)>().components().unwrap();
    assert_eq!(before[0], (A(1), B(10)));

    world.get_mut::<A>(ids[0]).unwrap().0 = 99;
    assert_eq!(before[0], (A(1), B(10)));
    assert_eq!(world.select::<(A, B)>().components().unwrap()[0], (A(99), B(10)));
}

#[test]
fn components_where_keeps_matching_rows() {
    let (world, _) = abc_world();
    let values = world
        .select::<(A, B)>()
        .components_where(|(a, _)| a.0 != 2)
        .unwrap();
    assert_eq!(values, vec![(A(1), B(10)), (A(3), B(30))]);
}

#[test]
fn empty_results_are_not_errors() {
    let world = World::new();
    assert!(world.select::<(A,)>().entities().unwrap().is_empty());
    assert!(world.select::<(A,)>().components().unwrap().is_empty());
    assert!(world.select::<(A,)>().entities_where(|_| true).unwrap().is_empty());
    assert!(world.select::<(A,)>().components_where(|_| true).unwrap().is_empty());
}

#[test]
fn repeated_calls_are_idempotent() {
    let (world, _) = abc_world();
    let selector = world.select::<(A, B)>();
    assert_eq!(selector.entities().unwrap(), selector.entities().unwrap());
    assert_eq!(
        selector.components_where(|(a, _)| a.0 > 1).unwrap(),
        selector.components_where(|(a, _)| a.0 > 1).unwrap()
    );
}

#[test]
fn tags_constrain_but_are_not_read() {
    let (mut world, ids) = abc_world();
    world.insert(ids[1], Tagged).unwrap();

    let tagged = world
        .select::<(A,)>()
        .with::<(Tagged,)>()
        .components()
        .unwrap();
    assert_eq!(tagged, vec![(A(2),)]);
}

proptest! {
    #[test]
    fn entities_where_is_ordered_subset(
        values in prop::collection::vec(-100i32..100, 0..48),
        cutoff in -100i32..100,
    ) {
        let mut world = World::new();
        for &v in &values {
            world.spawn((A(v), B(v))).unwrap();
        }

        let selector = world.select::<(A,)>().with::<(B,)>();
        let all = selector.entities().unwrap();
        let filtered = selector.entities_where(|(a,)| a.0 >= cutoff).unwrap();

        let expected: Vec<_> = all
            .iter()
            .copied()
            .filter(|&e| world.get::<A>(e).is_some_and(|a| a.0 >= cutoff))
            .collect();
        prop_assert_eq!(filtered, expected);
    }
}
