//! Shared component requirements for selections.

use sift_foundation::{ComponentTypeId, Result, SharedComponent};
use sift_storage::EntityQuery;

/// How a selection uses a shared component type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shared<S> {
    /// Require the shared component and match entities whose value equals this one.
    Match(S),
    /// Require the shared component, whatever its value.
    Tag,
}

impl<S: SharedComponent> Shared<S> {
    /// Shorthand for [`Shared::Match`].
    #[must_use]
    pub fn matching(value: S) -> Self {
        Self::Match(value)
    }

    /// Shorthand for [`Shared::Tag`].
    #[must_use]
    pub fn any() -> Self {
        Self::Tag
    }

    /// The component type this requirement refers to.
    #[must_use]
    pub fn component_type(&self) -> ComponentTypeId {
        ComponentTypeId::of::<S>()
    }

    pub(crate) fn into_filter(self) -> Option<Box<dyn SharedFilter>> {
        match self {
            Self::Match(value) => Some(Box::new(EqualTo(value))),
            Self::Tag => None,
        }
    }
}

/// An equality filter applied to a query handle.
pub(crate) trait SharedFilter: Send + Sync {
    fn apply(&self, query: &mut EntityQuery<'_>) -> Result<()>;
}

struct EqualTo<S>(S);

impl<S: SharedComponent> SharedFilter for EqualTo<S> {
    fn apply(&self, query: &mut EntityQuery<'_>) -> Result<()> {
        query.set_shared_filter(&self.0)
    }
}
