//! Core types and trait definitions for the placelog location store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod location;
pub mod store;

pub use error::MissingFields;
pub use location::{Location, LocationDraft, NewLocation};
pub use store::{LocationQuery, LocationStore};
