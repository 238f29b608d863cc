//! Integration tests for Layer 1: Storage
//!
//! Tests for entity lifecycle, structural changes, shared values, and queries.

mod queries;
mod shared;
