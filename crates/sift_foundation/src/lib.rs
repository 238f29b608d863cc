//! Core types, component traits, and errors for Sift.
//!
//! This crate provides:
//! - [`EntityId`] - Generational entity identifiers
//! - [`Component`] and [`SharedComponent`] - Marker traits for storable data
//! - [`ComponentTypeId`] - Runtime descriptors of component kinds
//! - [`Error`] - Error types shared by every layer

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod component;
pub mod entity;
pub mod error;

pub use component::{Component, ComponentTypeId, SharedComponent};
pub use entity::EntityId;
pub use error::{Error, ErrorKind};

/// Result type alias using the Sift [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
