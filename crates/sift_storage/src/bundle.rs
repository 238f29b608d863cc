//! Tuples of components used to spawn entities.
//!
//! [`Bundle`] is implemented for `()` and tuples of up to eight components;
//! [`SharedBundle`] for `()` and tuples of up to four shared components.

use sift_foundation::{Component, ComponentTypeId, Result, SharedComponent};

use crate::archetype::Archetype;
use crate::column::{Column, TypedColumn};
use crate::shared::{SharedIndex, SharedValueStore};

/// A set of component values written into one archetype row.
pub trait Bundle: Send + Sync + 'static {
    /// Component types in tuple order.
    fn component_types() -> Vec<ComponentTypeId>;

    /// One empty column per component type.
    fn empty_columns(capacity: usize) -> Vec<Box<dyn Column>>;

    /// Pushes each value into its column of `archetype`.
    ///
    /// # Errors
    ///
    /// Returns an error if `archetype` lacks a column for one of the values.
    fn write(self, archetype: &mut Archetype) -> Result<()>;
}

/// A set of shared component values attached to a spawned entity.
pub trait SharedBundle: 'static {
    /// Shared component types in tuple order.
    fn component_types() -> Vec<ComponentTypeId>;

    /// Interns each value, returning its type and index.
    fn intern(self, store: &mut SharedValueStore) -> Vec<(ComponentTypeId, SharedIndex)>;
}

impl Bundle for () {
    fn component_types() -> Vec<ComponentTypeId> {
        Vec::new()
    }

    fn empty_columns(_capacity: usize) -> Vec<Box<dyn Column>> {
        Vec::new()
    }

    fn write(self, _archetype: &mut Archetype) -> Result<()> {
        Ok(())
    }
}

impl SharedBundle for () {
    fn component_types() -> Vec<ComponentTypeId> {
        Vec::new()
    }

    fn intern(self, _store: &mut SharedValueStore) -> Vec<(ComponentTypeId, SharedIndex)> {
        Vec::new()
    }
}

macro_rules! bundle_tuple {
    ($head_ty:ident) => {
        impl_bundle_tuple!($head_ty);
    };
    ($head_ty:ident, $( $tail_ty:ident ),*) => (
        impl_bundle_tuple!($head_ty, $( $tail_ty ),*);
        bundle_tuple!($( $tail_ty ),*);
    );
}

macro_rules! impl_bundle_tuple {
    ( $( $ty: ident ),* ) => {
        impl<$( $ty: Component ),*> Bundle for ($( $ty, )*) {
            fn component_types() -> Vec<ComponentTypeId> {
                vec![$( ComponentTypeId::of::<$ty>(), )*]
            }

            fn empty_columns(capacity: usize) -> Vec<Box<dyn Column>> {
                vec![$( TypedColumn::<$ty>::boxed(capacity), )*]
            }

            fn write(self, archetype: &mut Archetype) -> Result<()> {
                #[allow(non_snake_case)]
                let ($( $ty, )*) = self;
                $( archetype.push_component($ty)?; )*
                Ok(())
            }
        }
    };
}

macro_rules! shared_bundle_tuple {
    ($head_ty:ident) => {
        impl_shared_bundle_tuple!($head_ty);
    };
    ($head_ty:ident, $( $tail_ty:ident ),*) => (
        impl_shared_bundle_tuple!($head_ty, $( $tail_ty ),*);
        shared_bundle_tuple!($( $tail_ty ),*);
    );
}

macro_rules! impl_shared_bundle_tuple {
    ( $( $ty: ident ),* ) => {
        impl<$( $ty: SharedComponent ),*> SharedBundle for ($( $ty, )*) {
            fn component_types() -> Vec<ComponentTypeId> {
                vec![$( ComponentTypeId::of::<$ty>(), )*]
            }

            fn intern(self, store: &mut SharedValueStore) -> Vec<(ComponentTypeId, SharedIndex)> {
                #[allow(non_snake_case)]
                let ($( $ty, )*) = self;
                vec![$( (ComponentTypeId::of::<$ty>(), store.intern($ty)), )*]
            }
        }
    };
}

bundle_tuple!(A, B, C, D, E, F, G, H);
shared_bundle_tuple!(A, B, C, D);
