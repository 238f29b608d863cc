//! Interned shared component values.
//!
//! A shared component value is stored once per distinct value. Entities (via
//! their archetype) reference it by [`SharedIndex`], and equality filtering
//! compares indices instead of values.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use sift_foundation::{ComponentTypeId, SharedComponent};
use tracing::debug;

/// Index of an interned shared value within its type's table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SharedIndex(pub u32);

trait SharedTable: Send + Sync {
    fn len(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct TypedSharedTable<S> {
    values: Vec<S>,
    lookup: HashMap<S, SharedIndex>,
}

impl<S: SharedComponent> SharedTable for TypedSharedTable<S> {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Per-type tables of interned shared values.
///
/// Values are never evicted; an index stays valid for the life of the store.
#[derive(Default)]
pub struct SharedValueStore {
    tables: HashMap<ComponentTypeId, Box<dyn SharedTable>>,
}

impl SharedValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `value`, returning the index of the stored copy.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` distinct values of one type are interned,
    /// or if the table for `S` holds another type (an internal bug).
    pub fn intern<S: SharedComponent>(&mut self, value: S) -> SharedIndex {
        let table = self.table_mut::<S>();
        if let Some(&index) = table.lookup.get(&value) {
            return index;
        }

        let index = SharedIndex(
            u32::try_from(table.values.len()).expect("shared value table overflow"),
        );
        table.values.push(value.clone());
        table.lookup.insert(value, index);
        let component = ComponentTypeId::of::<S>();
        debug!(%component, index = index.0, "interned shared value");
        index
    }

    /// Returns the index of a value equal to `value`, if one was interned.
    #[must_use]
    pub fn index_of<S: SharedComponent>(&self, value: &S) -> Option<SharedIndex> {
        self.table::<S>()?.lookup.get(value).copied()
    }

    /// Returns the interned value at `index`.
    #[must_use]
    pub fn get<S: SharedComponent>(&self, index: SharedIndex) -> Option<&S> {
        self.table::<S>()?.values.get(index.0 as usize)
    }

    /// Number of distinct values interned for `S`.
    #[must_use]
    pub fn value_count<S: SharedComponent>(&self) -> usize {
        self.tables
            .get(&ComponentTypeId::of::<S>())
            .map_or(0, |table| table.len())
    }

    /// Number of shared component types with at least one interned value.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.tables.len()
    }

    fn table<S: SharedComponent>(&self) -> Option<&TypedSharedTable<S>> {
        self.tables
            .get(&ComponentTypeId::of::<S>())?
            .as_any()
            .downcast_ref()
    }

    fn table_mut<S: SharedComponent>(&mut self) -> &mut TypedSharedTable<S> {
        let table = self
            .tables
            .entry(ComponentTypeId::of::<S>())
            .or_insert_with(|| {
                Box::new(TypedSharedTable::<S> {
                    values: Vec::new(),
                    lookup: HashMap::new(),
                })
            });
        table
            .as_any_mut()
            .downcast_mut()
            .expect("shared table registered under a foreign type id")
    }
}

impl fmt::Debug for SharedValueStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (ty, table) in &self.tables {
            map.entry(ty, &table.len());
        }
        map.finish()
    }
}
