//! Domain layer for the catalog console.
//!
//! This module contains the core domain types, independent of transport, terminal
//! or configuration concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`product`]: Product record, category and create/update payload
//!
//! # Examples
//!
//! ```
//! use catalog_console::domain::{Product, Result};
//!
//! fn parse(json: &str) -> Result<Product> {
//!     serde_json::from_str(json)
//!         .map_err(|e| catalog_console::CatalogError::Transport(e.to_string()))
//! }
//!
//! assert!(parse(r#"{"id": 1, "title": "Shirt", "price": 9}"#).is_ok());
//! ```

pub mod error;
pub mod product;

pub use error::{CatalogError, Result};
pub use product::{Category, Product, ProductDraft};
