//! Integration tests for Layer 2: Select
//!
//! Tests for selector counts, entity and component lists, singletons,
//! shared component requirements, and buffer release.

mod entities;
mod resources;
mod shared;
