//! Remote product API abstraction.
//!
//! [`ProductApi`] is the seam between the console and the catalog service. The
//! worker only talks to this trait, so the HTTP client can be swapped for the
//! in-memory implementation in tests.

use crate::domain::{Product, ProductDraft, Result};

/// Operations the console needs from the catalog service.
///
/// # Implementations
///
/// - [`HttpProductApi`](crate::transport::HttpProductApi): REST client (default)
/// - [`InMemoryProductApi`](crate::transport::InMemoryProductApi): process-local store
///
/// # Examples
///
/// ```
/// use catalog_console::transport::{InMemoryProductApi, ProductApi};
/// use catalog_console::ProductDraft;
///
/// let mut api = InMemoryProductApi::default();
/// let created = api.create(&ProductDraft {
///     title: "Mug".into(),
///     price: 8.0,
///     description: String::new(),
///     category_id: 2,
///     images: vec![],
/// })?;
/// assert_eq!(api.fetch_all()?.len(), 1);
/// api.delete(created.id)?;
/// # Ok::<(), catalog_console::CatalogError>(())
/// ```
pub trait ProductApi: Send {
    /// Fetches every product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Transport`](crate::CatalogError::Transport) on
    /// network failure, a non-success status, or an undecodable body.
    fn fetch_all(&mut self) -> Result<Vec<Product>>;

    /// Creates a product and returns the stored record with its assigned id.
    ///
    /// # Errors
    ///
    /// Same conditions as [`fetch_all`](Self::fetch_all).
    fn create(&mut self, draft: &ProductDraft) -> Result<Product>;

    /// Replaces the product `id` and returns the stored record.
    ///
    /// # Errors
    ///
    /// Same conditions as [`fetch_all`](Self::fetch_all).
    fn update(&mut self, id: i64, draft: &ProductDraft) -> Result<Product>;

    /// Deletes the product `id`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`fetch_all`](Self::fetch_all).
    fn delete(&mut self, id: i64) -> Result<()>;
}
