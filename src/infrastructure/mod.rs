//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{default_export_dir, expand_tilde, get_data_dir};
