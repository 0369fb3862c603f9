//! tinycart core - Shared types library.
//!
//! This crate provides common types used across all tinycart components:
//! - `server` - The HTTP API (auth, catalog, cart)
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. The optional `sqlite` feature adds `sqlx` encode/decode
//! impls so the types can be bound directly in queries.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
