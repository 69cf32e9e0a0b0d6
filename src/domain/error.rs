//! Error types for the catalog console.
//!
//! This module defines the centralized error type [`CatalogError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for catalog console operations.
///
/// The first three variants are the domain taxonomy: a remote call failed, a form
/// did not validate, or an id is not present in the in-memory view. All three are
/// recovered at the application boundary and turned into notifications (or
/// silently ignored, for `NotFound`); none is fatal. The remaining variants cover
/// the ambient concerns (configuration, files, themes).
///
/// # Examples
///
/// ```
/// use catalog_console::CatalogError;
///
/// fn validate_title(title: &str) -> Result<(), CatalogError> {
///     if title.trim().is_empty() {
///         return Err(CatalogError::Validation("title is required".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_title("  ").is_err());
/// ```
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A request to the remote product API failed.
    ///
    /// Covers network failures, non-success status codes and bodies that could
    /// not be decoded. The string describes the failing operation and cause.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Form input did not pass presence or type validation.
    ///
    /// The string names the offending field.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operation referenced a product id absent from the current view.
    #[error("Product not found: {0}")]
    NotFound(i64),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A CSV record could not be encoded.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when a configuration file cannot be parsed or a value is malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for catalog console operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
