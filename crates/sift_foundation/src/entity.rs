//! Entity handles with generational indices.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Handle to an entity in a world.
///
/// The generation distinguishes successive occupants of the same slot, so a
/// handle kept past its entity's despawn never aliases the slot's next owner.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityId {
    /// Slot index in the entity table.
    pub index: u64,
    /// Occupancy generation of the slot.
    pub generation: u32,
}

impl EntityId {
    /// Creates a handle from raw parts.
    #[must_use]
    pub const fn new(index: u64, generation: u32) -> Self {
        Self { index, generation }
    }

    /// The "no entity" handle. Its index is never handed out by a world.
    #[must_use]
    pub const fn null() -> Self {
        Self {
            index: u64::MAX,
            generation: 0,
        }
    }

    /// Returns true for [`EntityId::null`].
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.index == u64::MAX
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("EntityId(null)")
        } else {
            write!(f, "EntityId({}v{})", self.index, self.generation)
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("Entity(null)")
        } else {
            write!(f, "Entity({})", self.index)
        }
    }
}
