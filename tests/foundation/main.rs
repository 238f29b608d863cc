//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: EntityId, ComponentTypeId, and Error.

mod components;
mod entities;
mod errors;
