//! Filtered entity selection for Sift.
//!
//! This crate provides:
//! - [`Selector`] - Counts, entity lists, component lists and singleton
//!   lookups over a set of value components, optionally narrowed by tags,
//!   shared component values and predicates
//! - [`ValueSet`] and [`TagSet`] - Tuple traits naming the components involved
//! - [`Shared`] - A shared component requirement, matched by value or as a tag
//!
//! ```
//! use sift_select::prelude::*;
//! use sift_storage::World;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Health(u32);
//!
//! let mut world = World::new();
//! world.spawn((Health(1),)).unwrap();
//! world.spawn((Health(7),)).unwrap();
//!
//! let hurt = world.select::<(Health,)>().entity_count_where(|(h,)| h.0 < 5).unwrap();
//! assert_eq!(hurt, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod selector;
pub mod sets;
pub mod shared;

pub use selector::{SelectExt, Selector};
pub use sets::{TagSet, ValueSet};
pub use shared::Shared;

/// Common imports for selecting entities.
pub mod prelude {
    pub use crate::selector::{SelectExt, Selector};
    pub use crate::shared::Shared;
}
