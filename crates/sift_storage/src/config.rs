//! Configuration for a [`World`](crate::World).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default number of shared value filters a single query may carry.
pub const DEFAULT_MAX_SHARED_FILTERS: usize = 2;

/// Tunables for a world's storage.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// Entity slots reserved up front.
    pub entity_capacity: usize,

    /// Rows reserved in every newly created archetype.
    pub archetype_capacity: usize,

    /// Maximum shared value filters per query.
    pub max_shared_filters: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            entity_capacity: 0,
            archetype_capacity: 16,
            max_shared_filters: DEFAULT_MAX_SHARED_FILTERS,
        }
    }
}

impl WorldConfig {
    /// Creates a configuration for worlds holding many entities.
    #[must_use]
    pub fn large() -> Self {
        Self {
            entity_capacity: 65_536,
            archetype_capacity: 4_096,
            ..Self::default()
        }
    }

    /// Builder method to set the reserved entity slots.
    #[must_use]
    pub fn with_entity_capacity(mut self, capacity: usize) -> Self {
        self.entity_capacity = capacity;
        self
    }

    /// Builder method to set the rows reserved per archetype.
    #[must_use]
    pub fn with_archetype_capacity(mut self, capacity: usize) -> Self {
        self.archetype_capacity = capacity;
        self
    }

    /// Builder method to set the shared filter limit.
    #[must_use]
    pub fn with_max_shared_filters(mut self, limit: usize) -> Self {
        self.max_shared_filters = limit;
        self
    }
}
