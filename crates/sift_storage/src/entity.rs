//! Entity lifecycle management with generational indices.
//!
//! The `EntityStore` hands out entity handles, detects stale handles, and
//! remembers where each live entity's row sits in archetype storage.

// Allow u64 to usize casts - we target 64-bit systems
#![allow(clippy::cast_possible_truncation)]

use sift_foundation::{EntityId, Error, Result};

use crate::archetype::ArchetypeId;

/// Where a live entity's components are stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Location {
    /// Archetype holding the entity.
    pub archetype: ArchetypeId,
    /// Row within that archetype.
    pub row: usize,
}

/// Manages entity lifecycle and generation tracking.
///
/// Even generations mark free slots, odd generations mark live ones.
/// Freed indices are reused before new ones are allocated.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    generations: Vec<u32>,
    locations: Vec<Option<Location>>,
    free_list: Vec<u64>,
    live_count: usize,
}

impl EntityStore {
    /// Creates a new empty entity store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an entity store with slots reserved for `capacity` entities.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            generations: Vec::with_capacity(capacity),
            locations: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            live_count: 0,
        }
    }

    /// Allocates an entity stored at `location`.
    pub fn spawn(&mut self, location: Location) -> EntityId {
        self.live_count += 1;

        if let Some(index) = self.free_list.pop() {
            let idx = index as usize;
            self.generations[idx] += 1;
            self.locations[idx] = Some(location);
            EntityId::new(index, self.generations[idx])
        } else {
            let index = self.generations.len() as u64;
            self.generations.push(1);
            self.locations.push(Some(location));
            EntityId::new(index, 1)
        }
    }

    /// Frees an entity's slot, returning where its row was.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is stale or was never allocated.
    pub fn destroy(&mut self, id: EntityId) -> Result<Location> {
        let location = self.location(id)?;

        let idx = id.index as usize;
        self.generations[idx] += 1;
        self.locations[idx] = None;
        self.free_list.push(id.index);
        self.live_count -= 1;

        Ok(location)
    }

    /// Checks if an entity is live.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        self.validate(id).is_ok()
    }

    /// Validates that an entity is live.
    ///
    /// # Errors
    ///
    /// Returns `StaleEntity` if the slot moved on to a newer generation,
    /// `EntityNotFound` if the slot is free or was never allocated.
    pub fn validate(&self, id: EntityId) -> Result<()> {
        let Some(&current) = self.generations.get(id.index as usize) else {
            return Err(Error::entity_not_found(id));
        };

        if current != id.generation {
            return Err(Error::stale_entity(id));
        }

        if current % 2 == 0 {
            return Err(Error::entity_not_found(id));
        }

        Ok(())
    }

    /// Returns the storage location of a live entity.
    ///
    /// # Errors
    ///
    /// Same conditions as [`EntityStore::validate`].
    pub fn location(&self, id: EntityId) -> Result<Location> {
        self.validate(id)?;
        self.locations[id.index as usize]
            .ok_or_else(|| Error::internal(format!("live entity {id:?} has no location")))
    }

    /// Records that a live entity's row moved.
    ///
    /// # Errors
    ///
    /// Same conditions as [`EntityStore::validate`].
    pub fn relocate(&mut self, id: EntityId, location: Location) -> Result<()> {
        self.validate(id)?;
        self.locations[id.index as usize] = Some(location);
        Ok(())
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Iterates over live entity handles in index order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.generations
            .iter()
            .enumerate()
            .filter(|(_, generation)| *generation % 2 == 1)
            .map(|(idx, generation)| EntityId::new(idx as u64, *generation))
    }
}
