//! Transport layer for the remote catalog service.
//!
//! # Modules
//!
//! - `api`: [`ProductApi`] trait abstraction
//! - `http`: REST implementation on `reqwest`
//! - `memory`: in-memory implementation for tests and offline use

pub mod api;
pub mod http;
pub mod memory;

pub use api::ProductApi;
pub use http::{HttpProductApi, DEFAULT_API_URL};
pub use memory::InMemoryProductApi;
