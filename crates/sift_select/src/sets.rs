//! Type-level component lists.
//!
//! [`ValueSet`] lists the components whose values a selection reads and hands
//! to predicates. [`TagSet`] lists components that must be present but are
//! never read. Both are implemented for tuples by macro, so one generic
//! selector covers every arity.

use sift_foundation::{Component, ComponentTypeId, EntityId, Error, Result};
use sift_storage::{EntityQuery, NativeBuffer, World};

/// Components whose values are materialized and passed to predicates.
///
/// Implemented for `()` and tuples of one to eight components. The item type
/// is the tuple of cloned values, in declaration order. With `()` nothing is
/// read, so a selection can count or list entities by tags and shared
/// components alone.
pub trait ValueSet: 'static {
    /// One row of cloned values.
    type Item: Clone;

    /// Materialized columns, index-aligned with the query's entity array.
    type Buffers;

    /// Component types in declaration order.
    fn component_types() -> Vec<ComponentTypeId>;

    /// Materializes every column of the set from `query`.
    ///
    /// # Errors
    ///
    /// Propagates the query's materialization errors.
    fn materialize(query: &EntityQuery<'_>) -> Result<Self::Buffers>;

    /// Clones the row at `index` out of materialized buffers.
    fn item_at(buffers: &Self::Buffers, index: usize) -> Self::Item;

    /// Clones the values of one entity straight from the world.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` if the entity lacks one of the components.
    fn fetch(world: &World, entity: EntityId) -> Result<Self::Item>;
}

/// Components that must be present but are never read.
///
/// Implemented for `()` and tuples of one to eight components.
pub trait TagSet: 'static {
    /// Component types in declaration order.
    fn component_types() -> Vec<ComponentTypeId>;
}

impl TagSet for () {
    fn component_types() -> Vec<ComponentTypeId> {
        Vec::new()
    }
}

impl ValueSet for () {
    type Item = ();
    type Buffers = ();

    fn component_types() -> Vec<ComponentTypeId> {
        Vec::new()
    }

    fn materialize(_query: &EntityQuery<'_>) -> Result<Self::Buffers> {
        Ok(())
    }

    fn item_at(_buffers: &Self::Buffers, _index: usize) -> Self::Item {}

    fn fetch(_world: &World, _entity: EntityId) -> Result<Self::Item> {
        Ok(())
    }
}

macro_rules! set_tuple {
    ($head_ty:ident) => {
        impl_set_tuple!($head_ty);
    };
    ($head_ty:ident, $( $tail_ty:ident ),*) => (
        impl_set_tuple!($head_ty, $( $tail_ty ),*);
        set_tuple!($( $tail_ty ),*);
    );
}

macro_rules! impl_set_tuple {
    ( $( $ty: ident ),* ) => {
        impl<$( $ty: Component ),*> TagSet for ($( $ty, )*) {
            fn component_types() -> Vec<ComponentTypeId> {
                vec![$( ComponentTypeId::of::<$ty>(), )*]
            }
        }

        impl<$( $ty: Component ),*> ValueSet for ($( $ty, )*) {
            type Item = ($( $ty, )*);
            type Buffers = ($( NativeBuffer<$ty>, )*);

            fn component_types() -> Vec<ComponentTypeId> {
                vec![$( ComponentTypeId::of::<$ty>(), )*]
            }

            fn materialize(query: &EntityQuery<'_>) -> Result<Self::Buffers> {
                Ok(($( query.to_component_array::<$ty>()?, )*))
            }

            fn item_at(buffers: &Self::Buffers, index: usize) -> Self::Item {
                #[allow(non_snake_case)]
                let ($( $ty, )*) = buffers;
                ($( $ty[index].clone(), )*)
            }

            fn fetch(world: &World, entity: EntityId) -> Result<Self::Item> {
                Ok(($(
                    world
                        .get::<$ty>(entity)
                        .cloned()
                        .ok_or_else(|| Error::component_not_found(entity, ComponentTypeId::of::<$ty>()))?,
                )*))
            }
        }
    };
}

set_tuple!(A, B, C, D, E, F, G, H);
