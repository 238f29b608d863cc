//! Integration tests for component type descriptors

use sift_foundation::ComponentTypeId;

#[derive(Clone)]
struct Position;

#[derive(Clone)]
struct Wrapper<T>(T);

#[test]
fn identity_follows_type() {
    assert_eq!(ComponentTypeId::of::<Position>(), ComponentTypeId::of::<Position>());
    assert_ne!(ComponentTypeId::of::<Position>(), ComponentTypeId::of::<u32>());
}

#[test]
fn short_name_strips_path() {
    assert_eq!(ComponentTypeId::of::<Position>().short_name(), "Position");
    assert!(ComponentTypeId::of::<Position>().name().ends_with("::Position"));
    assert_eq!(format!("{}", ComponentTypeId::of::<Position>()), "Position");
}

#[test]
fn generic_names_keep_arguments() {
    let name = ComponentTypeId::of::<Wrapper<u8>>().short_name();
    assert!(name.starts_with("Wrapper<"));
}
