//! Type-erased component columns.
//!
//! Each archetype stores one column per component type. A column is a
//! `Vec<T>` behind the object-safe [`Column`] trait so archetypes can hold
//! columns of different types side by side.

use std::any::Any;

use sift_foundation::{Component, ComponentTypeId, Error, Result};

/// Object-safe view of a component column.
pub trait Column: Send + Sync {
    /// The component type stored in this column.
    fn component_type(&self) -> ComponentTypeId;

    /// Number of rows.
    fn len(&self) -> usize;

    /// Returns true if the column has no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops the value at `row`, moving the last row into its place.
    fn swap_remove(&mut self, row: usize);

    /// Moves the value at `row` to the end of `dst`, swap-removing it here.
    ///
    /// # Errors
    ///
    /// Returns an error if `dst` stores a different component type.
    fn move_row(&mut self, row: usize, dst: &mut dyn Column) -> Result<()>;

    /// Creates an empty column of the same type.
    fn empty(&self, capacity: usize) -> Box<dyn Column>;

    /// Upcasts for typed access.
    fn as_any(&self) -> &dyn Any;

    /// Upcasts for typed mutable access.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Column of `T` values.
#[derive(Debug, Clone)]
pub struct TypedColumn<T> {
    data: Vec<T>,
}

impl<T: Component> TypedColumn<T> {
    /// Creates an empty column.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Creates a boxed empty column.
    #[must_use]
    pub fn boxed(capacity: usize) -> Box<dyn Column> {
        Box::new(Self::with_capacity(capacity))
    }

    /// Appends a value.
    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    /// The stored values in row order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The stored values in row order, mutably.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Component> Column for TypedColumn<T> {
    fn component_type(&self) -> ComponentTypeId {
        ComponentTypeId::of::<T>()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn swap_remove(&mut self, row: usize) {
        self.data.swap_remove(row);
    }

    fn move_row(&mut self, row: usize, dst: &mut dyn Column) -> Result<()> {
        let dst_type = dst.component_type();
        let Some(dst) = dst.as_any_mut().downcast_mut::<Self>() else {
            return Err(Error::internal(format!(
                "cannot move {} row into {dst_type} column",
                self.component_type()
            )));
        };
        dst.data.push(self.data.swap_remove(row));
        Ok(())
    }

    fn empty(&self, capacity: usize) -> Box<dyn Column> {
        Self::boxed(capacity)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Downcasts a column to its typed form.
#[must_use]
pub fn typed<T: Component>(column: &dyn Column) -> Option<&TypedColumn<T>> {
    column.as_any().downcast_ref::<TypedColumn<T>>()
}

/// Downcasts a column to its typed form, mutably.
#[must_use]
pub fn typed_mut<T: Component>(column: &mut dyn Column) -> Option<&mut TypedColumn<T>> {
    column.as_any_mut().downcast_mut::<TypedColumn<T>>()
}
