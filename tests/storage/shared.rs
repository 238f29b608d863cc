//! Integration tests for shared component values

use sift_foundation::ErrorKind;
use sift_storage::World;

#[derive(Clone, Debug, PartialEq)]
struct Position(i32);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Team(u8);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Zone(&'static str);

#[test]
fn equal_values_share_an_archetype() {
    let mut world = World::new();
    let a = world.spawn_with_shared((Position(0),), (Team(1),)).unwrap();
    let before = world.archetype_count();
    let b = world.spawn_with_shared((Position(1),), (Team(1),)).unwrap();

    assert_eq!(world.archetype_count(), before);
    assert_eq!(world.get_shared::<Team>(a), Some(&Team(1)));
    assert_eq!(world.get_shared::<Team>(b), Some(&Team(1)));
    assert_eq!(world.shared_values().value_count::<Team>(), 1);
}

#[test]
fn different_values_split_archetypes() {
    let mut world = World::new();
    world.spawn_with_shared((Position(0),), (Team(1),)).unwrap();
    let before = world.archetype_count();
    world.spawn_with_shared((Position(0),), (Team(2),)).unwrap();

    assert_eq!(world.archetype_count(), before + 1);
    assert_eq!(world.shared_values().value_count::<Team>(), 2);
}

#[test]
fn set_and_remove_shared() {
    let mut world = World::new();
    let e = world.spawn((Position(0),)).unwrap();
    assert!(!world.has_shared::<Team>(e));

    world.set_shared(e, Team(3)).unwrap();
    world.set_shared(e, Zone("north")).unwrap();
    assert_eq!(world.get_shared::<Team>(e), Some(&Team(3)));
    assert_eq!(world.get_shared::<Zone>(e), Some(&Zone("north")));

    world.set_shared(e, Team(4)).unwrap();
    assert_eq!(world.get_shared::<Team>(e), Some(&Team(4)));

    assert!(world.remove_shared::<Team>(e).unwrap());
    assert!(!world.remove_shared::<Team>(e).unwrap());
    assert!(!world.has_shared::<Team>(e));
    assert_eq!(world.get::<Position>(e), Some(&Position(0)));
}

#[test]
fn repeated_shared_types_are_rejected() {
    let mut world = World::new();
    let err = world
        .spawn_with_shared((Position(0),), (Team(1), Team(2)))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateComponent(_)));
    assert_eq!(world.shared_values().value_count::<Team>(), 0);
}
