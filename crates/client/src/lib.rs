//! Back-office client - REST API client and product editing model.
//!
//! This crate is the data layer of the store's back-office dashboard. It
//! owns everything between the form surface and the HTTP boundary:
//!
//! - [`editor`] - the product edit session: entity collections with stable
//!   tracking keys, soft-delete reconciliation, the single/multiple variant
//!   mode machine, and validation
//! - [`multipart`] - the form-to-wire serializer flattening a nested value
//!   graph into bracket-notation multipart parts
//! - [`api`] - the REST client: products, categories, users, auth
//! - [`config`] - environment-based configuration
//! - [`validate`] - validation primitives with pluggable message catalogs
//!
//! Data flows one way at load time (server entity -> normalized form
//! defaults) and one way at submit time (draft -> validation -> serializer
//! -> HTTP). Server shapes live in `backoffice-core`; everything transient
//! (deleted flags, staged files) stays in this crate's view models.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod editor;
pub mod multipart;
pub mod validate;

pub use api::{ApiClient, ApiError};
pub use config::{ClientConfig, ConfigError};
pub use editor::{ProductEditor, SubmitError, VariantMode};
pub use multipart::{FileUpload, FormMap, FormValue};
pub use validate::{EnglishMessages, MessageProvider, ValidationError};
