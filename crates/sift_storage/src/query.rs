//! Queries over archetype storage.
//!
//! This module provides:
//! - [`QueryDesc`] - The component and shared component types a query requires
//! - [`EntityQuery`] - A scoped handle that matches archetypes and materializes results

use std::fmt;

use sift_foundation::{Component, ComponentTypeId, EntityId, Error, Result, SharedComponent};
use tracing::{debug, trace};

use crate::archetype::{Archetype, ArchetypeId};
use crate::buffer::{EntityBuffer, Lease, LeaseKind, NativeBuffer};
use crate::shared::SharedIndex;
use crate::world::World;

// =============================================================================
// Query Description
// =============================================================================

/// The types an entity must carry to match a query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryDesc {
    /// Required component types, in declaration order.
    all: Vec<ComponentTypeId>,
    /// Required shared component types, in declaration order.
    shared: Vec<ComponentTypeId>,
}

impl QueryDesc {
    /// Creates a description requiring nothing (matches every entity).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires component `T`.
    #[must_use]
    pub fn with<T: Component>(self) -> Self {
        self.with_types([ComponentTypeId::of::<T>()])
    }

    /// Requires every listed component type. Repeated types are ignored.
    #[must_use]
    pub fn with_types(mut self, types: impl IntoIterator<Item = ComponentTypeId>) -> Self {
        for ty in types {
            if !self.all.contains(&ty) {
                self.all.push(ty);
            }
        }
        self
    }

    /// Requires shared component `S`.
    #[must_use]
    pub fn with_shared<S: SharedComponent>(self) -> Self {
        self.with_shared_types([ComponentTypeId::of::<S>()])
    }

    /// Requires every listed shared component type. Repeated types are ignored.
    #[must_use]
    pub fn with_shared_types(mut self, types: impl IntoIterator<Item = ComponentTypeId>) -> Self {
        for ty in types {
            if !self.shared.contains(&ty) {
                self.shared.push(ty);
            }
        }
        self
    }

    /// Required component types.
    #[must_use]
    pub fn components(&self) -> &[ComponentTypeId] {
        &self.all
    }

    /// Required shared component types.
    #[must_use]
    pub fn shared(&self) -> &[ComponentTypeId] {
        &self.shared
    }

    /// Checks whether an archetype carries every required type.
    #[must_use]
    pub fn matches(&self, archetype: &Archetype) -> bool {
        let signature = archetype.signature();
        signature.contains_all(&self.all) && signature.has_all_shared(&self.shared)
    }
}

impl fmt::Display for QueryDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, ty) in self.all.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{ty}")?;
        }
        if !self.shared.is_empty() {
            f.write_str("; shared: ")?;
            for (i, ty) in self.shared.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{ty}")?;
            }
        }
        f.write_str(")")
    }
}

// =============================================================================
// Entity Query
// =============================================================================

/// An equality filter on one shared component type.
#[derive(Copy, Clone, Debug)]
struct SharedFilter {
    component: ComponentTypeId,
    /// `None` when the value was never interned, so nothing can match.
    index: Option<SharedIndex>,
}

/// A scoped query handle.
///
/// Borrows its world, so the world cannot change structurally while the
/// handle lives. The handle's lease is released when it is dropped.
pub struct EntityQuery<'w> {
    world: &'w World,
    desc: QueryDesc,
    filters: Vec<SharedFilter>,
    matched: Vec<ArchetypeId>,
    _lease: Lease,
}

impl<'w> EntityQuery<'w> {
    pub(crate) fn new(world: &'w World, desc: QueryDesc) -> Self {
        let lease = world.tracker().lease(LeaseKind::Query);
        let mut query = Self {
            world,
            desc,
            filters: Vec::new(),
            matched: Vec::new(),
            _lease: lease,
        };
        query.rematch();
        trace!(query = %query.desc, archetypes = query.matched.len(), "query created");
        query
    }

    /// The description this query was built from.
    #[must_use]
    pub fn desc(&self) -> &QueryDesc {
        &self.desc
    }

    /// Human-readable description, used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        self.desc.to_string()
    }

    /// Number of shared value filters currently applied.
    #[must_use]
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Number of archetypes currently matched.
    #[must_use]
    pub fn archetype_count(&self) -> usize {
        self.matched.len()
    }

    /// Narrows the query to entities whose `S` value equals `value`.
    ///
    /// Setting a filter for a type that is already filtered replaces it.
    ///
    /// # Errors
    ///
    /// Returns `SharedComponentNotInQuery` if the query does not require `S`,
    /// or `TooManySharedFilters` if the world's filter limit is reached.
    pub fn set_shared_filter<S: SharedComponent>(&mut self, value: &S) -> Result<()> {
        let component = ComponentTypeId::of::<S>();
        if !self.desc.shared.contains(&component) {
            return Err(Error::shared_not_in_query(component, self.describe()));
        }

        let index = self.world.shared_values().index_of(value);
        if let Some(existing) = self.filters.iter_mut().find(|f| f.component == component) {
            existing.index = index;
        } else {
            let limit = self.world.config().max_shared_filters;
            if self.filters.len() >= limit {
                return Err(Error::too_many_shared_filters(limit));
            }
            self.filters.push(SharedFilter { component, index });
        }

        self.rematch();
        Ok(())
    }

    /// Removes every shared value filter.
    pub fn reset_filter(&mut self) {
        self.filters.clear();
        self.rematch();
    }

    /// Number of matching entities.
    #[must_use]
    pub fn calculate_entity_count(&self) -> usize {
        self.archetypes().map(Archetype::len).sum()
    }

    /// Returns true if no entity matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archetypes().all(Archetype::is_empty)
    }

    /// Materializes the matching entities in archetype, then row, order.
    #[must_use]
    pub fn to_entity_array(&self) -> EntityBuffer {
        let mut buffer = self.world.allocate_buffer(self.calculate_entity_count());
        for archetype in self.archetypes() {
            buffer.extend(archetype.entities().iter().copied());
        }
        buffer
    }

    /// Materializes copies of component `T`, index-aligned with
    /// [`EntityQuery::to_entity_array`].
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotInQuery` if the query does not require `T`.
    pub fn to_component_array<T: Component>(&self) -> Result<NativeBuffer<T>> {
        let component = self.require::<T>()?;
        let mut buffer = self.world.allocate_buffer(self.calculate_entity_count());
        for archetype in self.archetypes() {
            let column = archetype.column::<T>().ok_or_else(|| {
                Error::internal(format!(
                    "matched archetype {} lacks {component}",
                    archetype.signature()
                ))
            })?;
            buffer.extend(column.iter().cloned());
        }
        Ok(buffer)
    }

    /// Returns the only matching entity.
    ///
    /// # Errors
    ///
    /// Returns `SingletonNotFound` if nothing matches and
    /// `SingletonNotUnique` if more than one entity matches.
    pub fn get_singleton_entity(&self) -> Result<EntityId> {
        let count = self.calculate_entity_count();
        if count != 1 {
            debug!(query = %self.desc, count, "singleton query did not match exactly one entity");
            return Err(if count == 0 {
                Error::singleton_not_found(self.describe())
            } else {
                Error::singleton_not_unique(self.describe(), count)
            });
        }
        self.archetypes()
            .find_map(|archetype| archetype.entities().first().copied())
            .ok_or_else(|| Error::internal("singleton count disagrees with storage"))
    }

    /// Returns a copy of component `T` on the only matching entity.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotInQuery` if the query does not require `T`, and
    /// the errors of [`EntityQuery::get_singleton_entity`].
    pub fn get_singleton<T: Component>(&self) -> Result<T> {
        let component = self.require::<T>()?;
        let entity = self.get_singleton_entity()?;
        self.world
            .get::<T>(entity)
            .cloned()
            .ok_or_else(|| Error::component_not_found(entity, component))
    }

    fn require<T: Component>(&self) -> Result<ComponentTypeId> {
        let component = ComponentTypeId::of::<T>();
        if self.desc.all.contains(&component) {
            Ok(component)
        } else {
            Err(Error::component_not_in_query(component, self.describe()))
        }
    }

    fn archetypes(&self) -> impl Iterator<Item = &'w Archetype> + '_ {
        let archetypes = self.world.archetypes();
        self.matched.iter().map(move |id| &archetypes[id.0])
    }

    fn rematch(&mut self) {
        let desc = &self.desc;
        let filters = &self.filters;
        self.matched = self
            .world
            .archetypes()
            .iter()
            .filter(|archetype| desc.matches(archetype))
            .filter(|archetype| {
                filters.iter().all(|filter| {
                    filter.index.is_some()
                        && archetype.signature().shared_index(filter.component) == filter.index
                })
            })
            .map(Archetype::id)
            .collect();
    }
}

impl fmt::Debug for EntityQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityQuery")
            .field("desc", &format_args!("{}", self.desc))
            .field("filters", &self.filters)
            .field("archetypes", &self.matched.len())
            .finish()
    }
}
