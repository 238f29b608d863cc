//! Archetype tables.
//!
//! An archetype holds every entity with exactly one combination of component
//! types and shared component values. Rows are dense: removing an entity
//! swap-removes its row in every column.

use std::fmt;

use sift_foundation::{Component, ComponentTypeId, EntityId, Error, Result};

use crate::column::{Column, typed, typed_mut};
use crate::shared::SharedIndex;

/// Index of an archetype within its world.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArchetypeId(pub usize);

/// The identity of an archetype: its component types and shared values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    /// Component types, sorted and unique.
    components: Vec<ComponentTypeId>,
    /// Shared component types with the index of their value, sorted by type.
    shared: Vec<(ComponentTypeId, SharedIndex)>,
}

impl Signature {
    /// Creates a signature, rejecting duplicate types.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateComponent` if a type appears twice in either list.
    pub fn new(
        mut components: Vec<ComponentTypeId>,
        mut shared: Vec<(ComponentTypeId, SharedIndex)>,
    ) -> Result<Self> {
        components.sort_unstable();
        if let Some(dup) = components.windows(2).find(|w| w[0] == w[1]) {
            return Err(Error::duplicate_component(dup[0]));
        }
        shared.sort_unstable_by_key(|(ty, _)| *ty);
        if let Some(dup) = shared.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(Error::duplicate_component(dup[0].0));
        }
        Ok(Self { components, shared })
    }

    /// The component types, sorted.
    #[must_use]
    pub fn components(&self) -> &[ComponentTypeId] {
        &self.components
    }

    /// The shared component types and value indices, sorted by type.
    #[must_use]
    pub fn shared(&self) -> &[(ComponentTypeId, SharedIndex)] {
        &self.shared
    }

    /// Checks if the signature has a component type.
    #[must_use]
    pub fn contains(&self, component: ComponentTypeId) -> bool {
        self.components.binary_search(&component).is_ok()
    }

    /// Checks if the signature has every listed component type.
    #[must_use]
    pub fn contains_all(&self, components: &[ComponentTypeId]) -> bool {
        components.iter().all(|c| self.contains(*c))
    }

    /// Returns the value index of a shared component type, if present.
    #[must_use]
    pub fn shared_index(&self, component: ComponentTypeId) -> Option<SharedIndex> {
        self.shared
            .binary_search_by_key(&component, |(ty, _)| *ty)
            .ok()
            .map(|pos| self.shared[pos].1)
    }

    /// Checks if the signature has every listed shared component type.
    #[must_use]
    pub fn has_all_shared(&self, components: &[ComponentTypeId]) -> bool {
        components.iter().all(|c| self.shared_index(*c).is_some())
    }

    /// Returns a signature with the component type added.
    #[must_use]
    pub fn with_component(&self, component: ComponentTypeId) -> Self {
        let mut next = self.clone();
        if let Err(pos) = next.components.binary_search(&component) {
            next.components.insert(pos, component);
        }
        next
    }

    /// Returns a signature with the component type removed.
    #[must_use]
    pub fn without_component(&self, component: ComponentTypeId) -> Self {
        let mut next = self.clone();
        if let Ok(pos) = next.components.binary_search(&component) {
            next.components.remove(pos);
        }
        next
    }

    /// Returns a signature with the shared value set, replacing any previous one.
    #[must_use]
    pub fn with_shared(&self, component: ComponentTypeId, index: SharedIndex) -> Self {
        let mut next = self.clone();
        match next
            .shared
            .binary_search_by_key(&component, |(ty, _)| *ty)
        {
            Ok(pos) => next.shared[pos].1 = index,
            Err(pos) => next.shared.insert(pos, (component, index)),
        }
        next
    }

    /// Returns a signature without the shared component type.
    #[must_use]
    pub fn without_shared(&self, component: ComponentTypeId) -> Self {
        let mut next = self.clone();
        if let Ok(pos) = next
            .shared
            .binary_search_by_key(&component, |(ty, _)| *ty)
        {
            next.shared.remove(pos);
        }
        next
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, ty) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{ty}")?;
        }
        for (ty, index) in &self.shared {
            write!(f, "; {ty}#{}", index.0)?;
        }
        f.write_str("]")
    }
}

/// Dense storage for all entities sharing one [`Signature`].
pub struct Archetype {
    id: ArchetypeId,
    signature: Signature,
    entities: Vec<EntityId>,
    /// One column per component type, aligned with `signature.components`.
    columns: Vec<Box<dyn Column>>,
}

impl Archetype {
    /// Creates an empty archetype from columns matching the signature.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the columns do not cover exactly the
    /// signature's component types.
    pub fn new(
        id: ArchetypeId,
        signature: Signature,
        mut columns: Vec<Box<dyn Column>>,
        capacity: usize,
    ) -> Result<Self> {
        columns.sort_unstable_by_key(|c| c.component_type());
        let types: Vec<_> = columns.iter().map(|c| c.component_type()).collect();
        if types != signature.components {
            return Err(Error::internal(format!(
                "columns do not match archetype signature {signature}"
            )));
        }
        Ok(Self {
            id,
            signature,
            entities: Vec::with_capacity(capacity),
            columns,
        })
    }

    /// This archetype's index in its world.
    #[must_use]
    pub fn id(&self) -> ArchetypeId {
        self.id
    }

    /// This archetype's signature.
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Entities in row order.
    #[must_use]
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the archetype holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Typed view of a component column, in row order.
    #[must_use]
    pub fn column<T: Component>(&self) -> Option<&[T]> {
        let column = self.columns.get(self.column_index(ComponentTypeId::of::<T>())?)?;
        typed::<T>(column.as_ref()).map(|c| c.as_slice())
    }

    /// Component value at `row`.
    #[must_use]
    pub fn get<T: Component>(&self, row: usize) -> Option<&T> {
        self.column::<T>()?.get(row)
    }

    /// Mutable component value at `row`.
    pub fn get_mut<T: Component>(&mut self, row: usize) -> Option<&mut T> {
        let index = self.column_index(ComponentTypeId::of::<T>())?;
        typed_mut::<T>(self.columns[index].as_mut())?
            .as_mut_slice()
            .get_mut(row)
    }

    /// Appends a component value to its column.
    ///
    /// Callers push one value per column and then [`Archetype::push_entity`].
    ///
    /// # Errors
    ///
    /// Returns an internal error if the archetype has no column for `T`.
    pub fn push_component<T: Component>(&mut self, value: T) -> Result<()> {
        let component = ComponentTypeId::of::<T>();
        let column = self
            .column_index(component)
            .and_then(|index| typed_mut::<T>(self.columns[index].as_mut()))
            .ok_or_else(|| {
                Error::internal(format!(
                    "archetype {} has no column for {component}",
                    self.signature
                ))
            })?;
        column.push(value);
        Ok(())
    }

    /// Appends an entity whose component values were already pushed.
    ///
    /// Returns the entity's row.
    ///
    /// # Errors
    ///
    /// Returns an internal error if a column length disagrees with the new row count.
    pub fn push_entity(&mut self, entity: EntityId) -> Result<usize> {
        let row = self.entities.len();
        if let Some(column) = self.columns.iter().find(|c| c.len() != row + 1) {
            return Err(Error::internal(format!(
                "column {} has {} rows, expected {}",
                column.component_type(),
                column.len(),
                row + 1
            )));
        }
        self.entities.push(entity);
        Ok(row)
    }

    /// Drops the entity at `row` and its components.
    ///
    /// Returns the entity moved into `row` to keep storage dense, if any.
    pub fn swap_remove(&mut self, row: usize) -> Option<EntityId> {
        for column in &mut self.columns {
            column.swap_remove(row);
        }
        self.entities.swap_remove(row);
        self.entities.get(row).copied()
    }

    /// Moves the entity at `row` into `dst`.
    ///
    /// Components `dst` also stores are moved; the rest are dropped. Columns
    /// `dst` has but this archetype lacks are left for the caller to fill
    /// before the row is complete. Returns the entity's new row in `dst` and
    /// the entity moved into `row` here, if any.
    ///
    /// # Errors
    ///
    /// Returns an internal error if a column move fails.
    pub fn move_row_to(
        &mut self,
        row: usize,
        dst: &mut Archetype,
    ) -> Result<(usize, Option<EntityId>)> {
        for column in &mut self.columns {
            match dst.column_index(column.component_type()) {
                Some(index) => column.move_row(row, dst.columns[index].as_mut())?,
                None => column.swap_remove(row),
            }
        }
        let entity = self.entities.swap_remove(row);
        let new_row = dst.entities.len();
        dst.entities.push(entity);
        Ok((new_row, self.entities.get(row).copied()))
    }

    fn column_index(&self, component: ComponentTypeId) -> Option<usize> {
        self.signature.components.binary_search(&component).ok()
    }

    /// Empty columns of the same types, for deriving a neighbouring archetype.
    pub(crate) fn empty_columns(&self, capacity: usize) -> Vec<Box<dyn Column>> {
        self.columns.iter().map(|c| c.empty(capacity)).collect()
    }
}

impl fmt::Debug for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Archetype")
            .field("id", &self.id)
            .field("signature", &format_args!("{}", self.signature))
            .field("len", &self.entities.len())
            .finish()
    }
}
