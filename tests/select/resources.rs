//! Integration tests for scoped buffer release

use std::panic::{AssertUnwindSafe, catch_unwind};

use proptest::prelude::*;
use sift_select::prelude::*;
use sift_storage::World;

use crate::common::{A, B, Team, abc_world, shared_world};

fn assert_released(world: &World) {
    assert_eq!(world.live_buffers(), 0);
    assert_eq!(world.live_queries(), 0);
}

#[test]
fn every_operation_releases() {
    let (world, _) = abc_world();
    let selector = world.select::<(A, B)>();

    selector.entity_count().unwrap();
    selector.entities().unwrap();
    selector.components().unwrap();
    let _ = selector.singleton();
    let _ = selector.singleton_entity();
    selector.entity_count_where(|_| true).unwrap();
    selector.entities_where(|_| true).unwrap();
    selector.components_where(|_| true).unwrap();
    let _ = selector.singleton_where(|_| true);
    let _ = selector.singleton_entity_where(|_| true);

    assert_released(&world);
}

#[test]
fn error_paths_release() {
    let (world, _) = shared_world();
    assert!(world.select::<(A,)>().singleton().is_err());
    assert!(world.select::<(A,)>().singleton_where(|_| false).is_err());
    assert!(
        world
            .select::<(A,)>()
            .shared(Shared::Match(Team(1)))
            .singleton_entity_where(|_| true)
            .is_err()
    );
    assert_released(&world);
}

#[test]
fn panicking_predicate_releases() {
    let (world, _) = abc_world();
    let selector = world.select::<(A,)>();

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        selector.components_where(|(a,)| {
            assert!(a.0 != 2, "predicate failure");
            true
        })
    }));

    assert!(outcome.is_err());
    assert_released(&world);
}

proptest! {
    #[test]
    fn released_after_arbitrary_selections(
        values in prop::collection::vec(0i32..10, 0..32),
        pick in 0i32..10,
    ) {
        let mut world = World::new();
        for &v in &values {
            world.spawn((A(v),)).unwrap();
        }

        let selector = world.select::<(A,)>();
        let _ = selector.singleton_where(|(a,)| a.0 == pick);
        let _ = selector.components_where(|(a,)| a.0 < pick);
        let _ = selector.entity_count();

        prop_assert_eq!(world.live_buffers(), 0);
        prop_assert_eq!(world.live_queries(), 0);
    }
}
