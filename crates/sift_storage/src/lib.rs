//! Archetype-based entity storage for Sift.
//!
//! This crate provides:
//! - [`EntityStore`] - Generational entity allocation and row locations
//! - [`Archetype`] - Dense column storage per component signature
//! - [`SharedValueStore`] - Interned shared component values
//! - [`World`] - The store itself, with spawning and structural changes
//! - [`EntityQuery`] - Scoped query handles that materialize [`NativeBuffer`]s

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod archetype;
pub mod buffer;
pub mod bundle;
pub mod column;
pub mod config;
pub mod entity;
pub mod query;
pub mod shared;
pub mod world;

pub use archetype::{Archetype, ArchetypeId, Signature};
pub use buffer::{AllocationTracker, EntityBuffer, Lease, LeaseKind, NativeBuffer};
pub use bundle::{Bundle, SharedBundle};
pub use column::{Column, TypedColumn};
pub use config::{DEFAULT_MAX_SHARED_FILTERS, WorldConfig};
pub use entity::{EntityStore, Location};
pub use query::{EntityQuery, QueryDesc};
pub use shared::{SharedIndex, SharedValueStore};
pub use world::World;
