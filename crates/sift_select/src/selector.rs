//! Filtered entity selection.
//!
//! A [`Selector`] names a set of value components, optional tag components,
//! and optional shared component requirements, and answers counts, entity
//! lists, component lists, and singleton lookups over the matching entities,
//! optionally narrowed by a predicate over the value components.
//!
//! Every operation opens a fresh scoped query, and every intermediate buffer
//! it materializes is released before the operation returns.

use std::fmt;
use std::marker::PhantomData;

use sift_foundation::{ComponentTypeId, EntityId, Error, Result, SharedComponent};
use sift_storage::{EntityQuery, QueryDesc, World};
use tracing::trace;

use crate::sets::{TagSet, ValueSet};
use crate::shared::{Shared, SharedFilter};

/// Selects entities carrying value components `V` and tag components `T`.
pub struct Selector<'w, V: ValueSet, T: TagSet = ()> {
    world: &'w World,
    shared: Vec<ComponentTypeId>,
    filters: Vec<(ComponentTypeId, Box<dyn SharedFilter>)>,
    _marker: PhantomData<fn() -> (V, T)>,
}

impl<'w, V: ValueSet> Selector<'w, V> {
    /// Creates a selector over `world` with no tags or shared requirements.
    #[must_use]
    pub fn new(world: &'w World) -> Self {
        Self {
            world,
            shared: Vec::new(),
            filters: Vec::new(),
            _marker: PhantomData,
        }
    }
}

impl<'w, V: ValueSet, T: TagSet> Selector<'w, V, T> {
    /// Requires tag components `U`, replacing any previous tag set.
    #[must_use]
    pub fn with<U: TagSet>(self) -> Selector<'w, V, U> {
        Selector {
            world: self.world,
            shared: self.shared,
            filters: self.filters,
            _marker: PhantomData,
        }
    }

    /// Requires shared component `S`, narrowed to one value for [`Shared::Match`].
    ///
    /// A later requirement for the same type replaces the earlier one.
    #[must_use]
    pub fn shared<S: SharedComponent>(mut self, requirement: Shared<S>) -> Self {
        let component = requirement.component_type();
        if !self.shared.contains(&component) {
            self.shared.push(component);
        }
        self.filters.retain(|(ty, _)| *ty != component);
        if let Some(filter) = requirement.into_filter() {
            self.filters.push((component, filter));
        }
        self
    }

    /// The query description this selector builds.
    #[must_use]
    pub fn desc(&self) -> QueryDesc {
        QueryDesc::new()
            .with_types(V::component_types())
            .with_types(T::component_types())
            .with_shared_types(self.shared.iter().copied())
    }

    // --- Without predicate ---

    /// Number of matching entities.
    ///
    /// # Errors
    ///
    /// Propagates errors from applying shared filters.
    pub fn entity_count(&self) -> Result<usize> {
        let query = self.scoped_query()?;
        Ok(query.calculate_entity_count())
    }

    /// Matching entities, in storage order.
    ///
    /// # Errors
    ///
    /// Propagates errors from applying shared filters.
    pub fn entities(&self) -> Result<Vec<EntityId>> {
        let query = self.scoped_query()?;
        Ok(query.to_entity_array().into_vec())
    }

    /// Copies of the value components of every matching entity, in storage order.
    ///
    /// # Errors
    ///
    /// Propagates errors from applying shared filters or materializing columns.
    pub fn components(&self) -> Result<Vec<V::Item>> {
        let query = self.scoped_query()?;
        let values = V::materialize(&query)?;
        let count = query.calculate_entity_count();
        Ok((0..count).map(|index| V::item_at(&values, index)).collect())
    }

    /// The only matching entity.
    ///
    /// # Errors
    ///
    /// Returns the store's singleton errors when zero or several entities match.
    pub fn singleton_entity(&self) -> Result<EntityId> {
        let query = self.scoped_query()?;
        query.get_singleton_entity()
    }

    /// Copies of the value components of the only matching entity.
    ///
    /// # Errors
    ///
    /// Returns the store's singleton errors when zero or several entities match.
    pub fn singleton(&self) -> Result<V::Item> {
        let entity = self.singleton_entity()?;
        V::fetch(self.world, entity)
    }

    // --- With predicate ---

    /// Number of matching entities accepted by `predicate`.
    ///
    /// # Errors
    ///
    /// Propagates errors from applying shared filters or materializing columns.
    pub fn entity_count_where<P>(&self, predicate: P) -> Result<usize>
    where
        P: FnMut(V::Item) -> bool,
    {
        Ok(self.entities_where(predicate)?.len())
    }

    /// Matching entities accepted by `predicate`, in storage order.
    ///
    /// # Errors
    ///
    /// Propagates errors from applying shared filters or materializing columns.
    pub fn entities_where<P>(&self, predicate: P) -> Result<Vec<EntityId>>
    where
        P: FnMut(V::Item) -> bool,
    {
        self.filter_rows(predicate, |entity, _, _| entity)
    }

    /// Value components of matching entities accepted by `predicate`.
    ///
    /// # Errors
    ///
    /// Propagates errors from applying shared filters or materializing columns.
    pub fn components_where<P>(&self, predicate: P) -> Result<Vec<V::Item>>
    where
        P: FnMut(V::Item) -> bool,
    {
        self.filter_rows(predicate, |_, values, index| V::item_at(values, index))
    }

    /// The only matching entity accepted by `predicate`.
    ///
    /// # Errors
    ///
    /// Returns `SingletonNotFound` or `SingletonNotUnique` unless exactly one
    /// entity is accepted.
    pub fn singleton_entity_where<P>(&self, predicate: P) -> Result<EntityId>
    where
        P: FnMut(V::Item) -> bool,
    {
        let accepted = self.entities_where(predicate)?;
        self.exactly_one(accepted)
    }

    /// Value components of the only matching entity accepted by `predicate`.
    ///
    /// # Errors
    ///
    /// Returns `SingletonNotFound` or `SingletonNotUnique` unless exactly one
    /// entity is accepted.
    pub fn singleton_where<P>(&self, predicate: P) -> Result<V::Item>
    where
        P: FnMut(V::Item) -> bool,
    {
        let accepted = self.components_where(predicate)?;
        self.exactly_one(accepted)
    }

    // --- Private helpers ---

    /// Opens a query over the full type list with every shared filter applied.
    fn scoped_query(&self) -> Result<EntityQuery<'w>> {
        let mut query = self.world.query(self.desc());
        for (_, filter) in &self.filters {
            filter.apply(&mut query)?;
        }
        Ok(query)
    }

    /// Materializes the candidates, then keeps the rows `predicate` accepts.
    fn filter_rows<P, R>(
        &self,
        mut predicate: P,
        mut pick: impl FnMut(EntityId, &V::Buffers, usize) -> R,
    ) -> Result<Vec<R>>
    where
        P: FnMut(V::Item) -> bool,
    {
        let query = self.scoped_query()?;
        let entities = query.to_entity_array();
        let values = V::materialize(&query)?;

        let mut accepted = self.world.allocate_buffer(entities.len());
        for (index, &entity) in entities.iter().enumerate() {
            if predicate(V::item_at(&values, index)) {
                accepted.push(pick(entity, &values, index));
            }
        }

        trace!(
            query = %query.desc(),
            candidates = entities.len(),
            accepted = accepted.len(),
            "filtered selection"
        );
        Ok(accepted.into_vec())
    }

    fn exactly_one<R>(&self, mut accepted: Vec<R>) -> Result<R> {
        match accepted.len() {
            1 => accepted
                .pop()
                .ok_or_else(|| Error::internal("accepted row vanished")),
            0 => Err(Error::singleton_not_found(self.desc().to_string())),
            count => Err(Error::singleton_not_unique(self.desc().to_string(), count)),
        }
    }
}

impl<V: ValueSet, T: TagSet> fmt::Debug for Selector<'_, V, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("desc", &self.desc().to_string())
            .field("filters", &self.filters.len())
            .finish()
    }
}

/// Adds [`select`](SelectExt::select) to [`World`].
pub trait SelectExt {
    /// Starts a selection over value components `V`.
    fn select<V: ValueSet>(&self) -> Selector<'_, V>;
}

impl SelectExt for World {
    fn select<V: ValueSet>(&self) -> Selector<'_, V> {
        Selector::new(self)
    }
}
