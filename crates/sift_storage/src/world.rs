//! World state: entities, archetypes, and shared values.
//!
//! The `World` is the unified interface to all storage systems. Structural
//! changes take `&mut self`; queries borrow `&self`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use sift_foundation::{Component, ComponentTypeId, EntityId, Error, Result, SharedComponent};
use tracing::debug;

use crate::archetype::{Archetype, ArchetypeId, Signature};
use crate::buffer::{AllocationTracker, LeaseKind, NativeBuffer};
use crate::bundle::{Bundle, SharedBundle};
use crate::column::{Column, TypedColumn};
use crate::config::WorldConfig;
use crate::entity::{EntityStore, Location};
use crate::query::{EntityQuery, QueryDesc};
use crate::shared::SharedValueStore;

/// Entity storage organized into archetypes.
pub struct World {
    config: WorldConfig,
    entities: EntityStore,
    archetypes: Vec<Archetype>,
    archetype_index: HashMap<Signature, ArchetypeId>,
    shared: SharedValueStore,
    tracker: Arc<AllocationTracker>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates an empty world with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates an empty world with the given configuration.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            entities: EntityStore::with_capacity(config.entity_capacity),
            config,
            archetypes: Vec::new(),
            archetype_index: HashMap::new(),
            shared: SharedValueStore::new(),
            tracker: Arc::new(AllocationTracker::new()),
        }
    }

    /// The configuration this world was created with.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    // --- Entity lifecycle ---

    /// Spawns an entity with the given components.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateComponent` if the bundle repeats a type.
    pub fn spawn<B: Bundle>(&mut self, bundle: B) -> Result<EntityId> {
        self.spawn_with_shared(bundle, ())
    }

    /// Spawns an entity with the given components and shared values.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateComponent` if either bundle repeats a type.
    pub fn spawn_with_shared<B: Bundle, S: SharedBundle>(
        &mut self,
        bundle: B,
        shared: S,
    ) -> Result<EntityId> {
        // Reject repeated types before anything is interned.
        Signature::new(B::component_types(), Vec::new())?;
        Signature::new(S::component_types(), Vec::new())?;
        let shared = shared.intern(&mut self.shared);
        let signature = Signature::new(B::component_types(), shared)?;

        let capacity = self.config.archetype_capacity;
        let id = self.archetype_for(signature, || B::empty_columns(capacity))?;
        let archetype = &mut self.archetypes[id.0];

        bundle.write(archetype)?;
        let row = archetype.entities().len();
        let entity = self.entities.spawn(Location { archetype: id, row });
        archetype.push_entity(entity)?;
        Ok(entity)
    }

    /// Despawns an entity and drops its components.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is stale or not found.
    pub fn despawn(&mut self, entity: EntityId) -> Result<()> {
        let location = self.entities.destroy(entity)?;
        let moved = self.archetypes[location.archetype.0].swap_remove(location.row);
        if let Some(moved) = moved {
            self.entities.relocate(moved, location)?;
        }
        Ok(())
    }

    /// Checks if an entity is live.
    #[must_use]
    pub fn exists(&self, entity: EntityId) -> bool {
        self.entities.exists(entity)
    }

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterates over live entity handles in index order.
    pub fn iter_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter()
    }

    // --- Components ---

    /// Adds or replaces component `T` on an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is stale or not found.
    pub fn insert<T: Component>(&mut self, entity: EntityId, value: T) -> Result<()> {
        let location = self.entities.location(entity)?;
        if let Some(slot) = self.archetypes[location.archetype.0].get_mut::<T>(location.row) {
            *slot = value;
            return Ok(());
        }

        let source = &self.archetypes[location.archetype.0];
        let signature = source
            .signature()
            .with_component(ComponentTypeId::of::<T>());
        let capacity = self.config.archetype_capacity;
        let mut columns = source.empty_columns(capacity);
        let target = self.archetype_for(signature, move || {
            columns.push(TypedColumn::<T>::boxed(capacity));
            columns
        })?;

        let row = self.relocate(entity, location, target)?;
        let archetype = &mut self.archetypes[target.0];
        archetype.push_component(value)?;
        debug_assert_eq!(archetype.len(), row + 1);
        Ok(())
    }

    /// Removes component `T` from an entity, returning the removed value.
    ///
    /// Returns `Ok(None)` if the entity did not carry `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is stale or not found.
    pub fn remove<T: Component>(&mut self, entity: EntityId) -> Result<Option<T>> {
        let location = self.entities.location(entity)?;
        let source = &self.archetypes[location.archetype.0];
        let Some(value) = source.get::<T>(location.row).cloned() else {
            return Ok(None);
        };

        let component = ComponentTypeId::of::<T>();
        let signature = source.signature().without_component(component);
        let capacity = self.config.archetype_capacity;
        let columns: Vec<Box<dyn Column>> = source
            .empty_columns(capacity)
            .into_iter()
            .filter(|c| c.component_type() != component)
            .collect();
        let target = self.archetype_for(signature, move || columns)?;

        self.relocate(entity, location, target)?;
        Ok(Some(value))
    }

    /// Returns component `T` of an entity.
    #[must_use]
    pub fn get<T: Component>(&self, entity: EntityId) -> Option<&T> {
        let location = self.entities.location(entity).ok()?;
        self.archetypes[location.archetype.0].get::<T>(location.row)
    }

    /// Returns component `T` of an entity, mutably.
    pub fn get_mut<T: Component>(&mut self, entity: EntityId) -> Option<&mut T> {
        let location = self.entities.location(entity).ok()?;
        self.archetypes[location.archetype.0].get_mut::<T>(location.row)
    }

    /// Checks if an entity carries component `T`.
    #[must_use]
    pub fn has<T: Component>(&self, entity: EntityId) -> bool {
        self.entities.location(entity).is_ok_and(|location| {
            self.archetypes[location.archetype.0]
                .signature()
                .contains(ComponentTypeId::of::<T>())
        })
    }

    // --- Shared components ---

    /// Sets shared component `S` of an entity, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is stale or not found.
    pub fn set_shared<S: SharedComponent>(&mut self, entity: EntityId, value: S) -> Result<()> {
        let location = self.entities.location(entity)?;
        let index = self.shared.intern(value);
        let source = &self.archetypes[location.archetype.0];
        let signature = source
            .signature()
            .with_shared(ComponentTypeId::of::<S>(), index);
        if &signature == source.signature() {
            return Ok(());
        }

        let columns = source.empty_columns(self.config.archetype_capacity);
        let target = self.archetype_for(signature, move || columns)?;
        self.relocate(entity, location, target)?;
        Ok(())
    }

    /// Removes shared component `S` from an entity.
    ///
    /// Returns whether the entity carried `S`.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is stale or not found.
    pub fn remove_shared<S: SharedComponent>(&mut self, entity: EntityId) -> Result<bool> {
        let location = self.entities.location(entity)?;
        let component = ComponentTypeId::of::<S>();
        let source = &self.archetypes[location.archetype.0];
        if source.signature().shared_index(component).is_none() {
            return Ok(false);
        }

        let signature = source.signature().without_shared(component);
        let columns = source.empty_columns(self.config.archetype_capacity);
        let target = self.archetype_for(signature, move || columns)?;
        self.relocate(entity, location, target)?;
        Ok(true)
    }

    /// Returns the shared component `S` value of an entity.
    #[must_use]
    pub fn get_shared<S: SharedComponent>(&self, entity: EntityId) -> Option<&S> {
        let location = self.entities.location(entity).ok()?;
        let index = self.archetypes[location.archetype.0]
            .signature()
            .shared_index(ComponentTypeId::of::<S>())?;
        self.shared.get::<S>(index)
    }

    /// Checks if an entity carries shared component `S`.
    #[must_use]
    pub fn has_shared<S: SharedComponent>(&self, entity: EntityId) -> bool {
        self.get_shared::<S>(entity).is_some()
    }

    /// The interned shared values.
    #[must_use]
    pub fn shared_values(&self) -> &SharedValueStore {
        &self.shared
    }

    // --- Queries and buffers ---

    /// Creates a query handle over this world.
    #[must_use]
    pub fn query(&self, desc: QueryDesc) -> EntityQuery<'_> {
        EntityQuery::new(self, desc)
    }

    /// Allocates a tracked transient buffer.
    #[must_use]
    pub fn allocate_buffer<T>(&self, capacity: usize) -> NativeBuffer<T> {
        NativeBuffer::new(capacity, self.tracker.lease(LeaseKind::Buffer))
    }

    /// Number of buffers allocated from this world and not yet released.
    #[must_use]
    pub fn live_buffers(&self) -> usize {
        self.tracker.live_buffers()
    }

    /// Number of query handles on this world not yet released.
    #[must_use]
    pub fn live_queries(&self) -> usize {
        self.tracker.live_queries()
    }

    /// All archetypes, indexed by [`ArchetypeId`].
    #[must_use]
    pub fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }

    /// Number of archetypes created so far.
    #[must_use]
    pub fn archetype_count(&self) -> usize {
        self.archetypes.len()
    }

    pub(crate) fn tracker(&self) -> &Arc<AllocationTracker> {
        &self.tracker
    }

    // --- Private helpers ---

    fn archetype_for(
        &mut self,
        signature: Signature,
        columns: impl FnOnce() -> Vec<Box<dyn Column>>,
    ) -> Result<ArchetypeId> {
        if let Some(&id) = self.archetype_index.get(&signature) {
            return Ok(id);
        }

        let id = ArchetypeId(self.archetypes.len());
        debug!(archetype = id.0, %signature, "created archetype");
        let archetype = Archetype::new(
            id,
            signature.clone(),
            columns(),
            self.config.archetype_capacity,
        )?;
        self.archetypes.push(archetype);
        self.archetype_index.insert(signature, id);
        Ok(id)
    }

    /// Moves an entity's row into `target`, fixing up both entities' locations.
    fn relocate(&mut self, entity: EntityId, from: Location, target: ArchetypeId) -> Result<usize> {
        if from.archetype == target {
            return Err(Error::internal(format!(
                "relocating {entity:?} into its own archetype"
            )));
        }

        let (source, dest) = pair_mut(&mut self.archetypes, from.archetype.0, target.0);
        let (row, moved) = source.move_row_to(from.row, dest)?;
        if let Some(moved) = moved {
            self.entities.relocate(moved, from)?;
        }
        self.entities.relocate(
            entity,
            Location {
                archetype: target,
                row,
            },
        )?;
        Ok(row)
    }
}

/// Borrows two distinct archetypes mutably.
fn pair_mut(archetypes: &mut [Archetype], a: usize, b: usize) -> (&mut Archetype, &mut Archetype) {
    if a < b {
        let (left, right) = archetypes.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = archetypes.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("entities", &self.entities.len())
            .field("archetypes", &self.archetypes)
            .field("shared", &self.shared)
            .finish_non_exhaustive()
    }
}
