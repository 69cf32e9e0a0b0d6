//! Request and response types exchanged with the transport worker.
//!
//! The application layer never calls the remote API directly. It emits a
//! [`TransportRequest`] inside an action, the worker runs it against a
//! [`ProductApi`](crate::transport::ProductApi), and the outcome comes back as a
//! [`TransportResponse`] event.

use crate::domain::{Product, ProductDraft};
use serde::{Deserialize, Serialize};

/// Which remote operation a request or failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportOperation {
    FetchAll,
    Create,
    Update,
    Delete,
}

impl TransportOperation {
    /// Short human-readable description used in logs and notifications.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::FetchAll => "load products",
            Self::Create => "create product",
            Self::Update => "update product",
            Self::Delete => "delete product",
        }
    }
}

/// Messages sent from the console to the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransportRequest {
    /// Fetch the whole catalog.
    FetchAll,

    /// Create a product from a validated form.
    Create {
        draft: ProductDraft,
    },

    /// Replace an existing product.
    Update {
        id: i64,
        draft: ProductDraft,
    },

    /// Delete a product.
    Delete {
        id: i64,
    },
}

impl TransportRequest {
    #[must_use]
    pub const fn operation(&self) -> TransportOperation {
        match self {
            Self::FetchAll => TransportOperation::FetchAll,
            Self::Create { .. } => TransportOperation::Create,
            Self::Update { .. } => TransportOperation::Update,
            Self::Delete { .. } => TransportOperation::Delete,
        }
    }
}

/// Responses sent from the worker back to the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransportResponse {
    /// The catalog was fetched.
    ProductsLoaded {
        products: Vec<Product>,
    },

    /// A product was created; `product` carries the server-assigned id.
    ProductCreated {
        product: Product,
    },

    /// A product was replaced.
    ProductUpdated {
        id: i64,
        product: Product,
    },

    /// A product was deleted.
    ProductDeleted {
        id: i64,
    },

    /// The operation failed. Local state must not change.
    Error {
        operation: TransportOperation,
        message: String,
    },
}
