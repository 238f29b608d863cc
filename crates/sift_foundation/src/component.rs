//! Component marker traits and runtime type descriptors.

use std::any::{TypeId, type_name};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Data that can be attached to an entity.
///
/// Implemented for every `'static + Clone + Send + Sync` type. Queries hand
/// out clones, so reading a component never aliases stored data.
pub trait Component: 'static + Clone + Send + Sync {}

impl<T: 'static + Clone + Send + Sync> Component for T {}

/// A component whose value is interned and shared between entities.
///
/// Entities holding equal values reference the same stored copy, and queries
/// can be narrowed to entities whose value equals a given one.
pub trait SharedComponent: Component + Eq + Hash {}

impl<T: Component + Eq + Hash> SharedComponent for T {}

/// Runtime descriptor of a component kind.
///
/// Identity, hashing, and ordering use the [`TypeId`] only; the name is kept
/// for diagnostics.
#[derive(Clone, Copy)]
pub struct ComponentTypeId {
    id: TypeId,
    name: &'static str,
}

impl ComponentTypeId {
    /// Returns the descriptor for `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The underlying [`TypeId`].
    #[must_use]
    pub fn type_id(self) -> TypeId {
        self.id
    }

    /// The fully qualified type name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.name
    }

    /// The type name without its module path.
    #[must_use]
    pub fn short_name(self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        match base.rfind("::") {
            Some(pos) => &self.name[pos + 2..],
            None => self.name,
        }
    }
}

impl PartialEq for ComponentTypeId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentTypeId {}

impl Hash for ComponentTypeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for ComponentTypeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComponentTypeId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Debug for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentTypeId({})", self.short_name())
    }
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
