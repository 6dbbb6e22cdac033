//! Back-office core - shared types library.
//!
//! This crate provides the server-side entity shapes and common types used
//! across the back-office components:
//! - `client` - REST API client and the product editing model
//! - `cli` - command-line tools for store management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Everything
//! here mirrors what the REST backend sends and receives; client-side editing
//! state lives in the `client` crate instead.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, entity shapes, emails, and lenient serde helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
