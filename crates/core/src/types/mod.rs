//! Core types for the back office.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod auth;
pub mod category;
pub mod email;
pub mod flexible;
pub mod id;
pub mod product;
pub mod user;

pub use auth::{LoginResponse, RegisterResponse};
pub use category::Category;
pub use email::{Email, EmailError};
pub use id::*;
pub use product::{Dimensions, Product, ProductAttribute, ProductInformation, ProductVariant};
pub use user::User;
