//! Sift - Filtered entity selection over archetype storage
//!
//! This crate re-exports all layers of the Sift system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: sift_select     - Selectors, value/tag sets, shared requirements
//! Layer 1: sift_storage    - Archetypes, shared values, queries, buffers
//! Layer 0: sift_foundation - Core types (EntityId, ComponentTypeId, Error)
//! ```

pub use sift_foundation as foundation;
pub use sift_select as select;
pub use sift_storage as storage;
