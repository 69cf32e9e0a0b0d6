//! Process-local [`ProductApi`] used by tests and offline runs.

use crate::domain::{CatalogError, Product, ProductDraft, Result};
use crate::transport::ProductApi;

/// Keeps products in a `Vec` and assigns ids the way the remote service does.
///
/// [`fail_next`](Self::fail_next) makes the following call fail with a
/// transport error, which lets tests exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductApi {
    products: Vec<Product>,
    failure: Option<String>,
}

impl InMemoryProductApi {
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            failure: None,
        }
    }

    /// Makes the next call fail with `message`.
    pub fn fail_next(&mut self, message: impl Into<String>) {
        self.failure = Some(message.into());
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    fn check_failure(&mut self, operation: &str) -> Result<()> {
        match self.failure.take() {
            Some(message) => Err(CatalogError::Transport(format!("{operation}: {message}"))),
            None => Ok(()),
        }
    }

    fn next_id(&self) -> i64 {
        self.products.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    fn position(&self, operation: &str, id: i64) -> Result<usize> {
        self.products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CatalogError::Transport(format!("{operation}: 404 Not Found")))
    }
}

impl ProductApi for InMemoryProductApi {
    fn fetch_all(&mut self) -> Result<Vec<Product>> {
        self.check_failure("fetch products")?;
        Ok(self.products.clone())
    }

    fn create(&mut self, draft: &ProductDraft) -> Result<Product> {
        self.check_failure("create product")?;
        let product = Product::from_draft(self.next_id(), draft);
        self.products.push(product.clone());
        Ok(product)
    }

    fn update(&mut self, id: i64, draft: &ProductDraft) -> Result<Product> {
        self.check_failure("update product")?;
        let index = self.position("update product", id)?;
        let product = Product::from_draft(id, draft);
        self.products[index] = product.clone();
        Ok(product)
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        self.check_failure("delete product")?;
        let index = self.position("delete product", id)?;
        self.products.remove(index);
        Ok(())
    }
}
