//! REST client for the catalog service.
//!
//! Maps [`ProductApi`] onto JSON over HTTP:
//!
//! | operation   | request              |
//! |-------------|----------------------|
//! | `fetch_all` | `GET {base}`         |
//! | `create`    | `POST {base}`        |
//! | `update`    | `PUT {base}/{id}`    |
//! | `delete`    | `DELETE {base}/{id}` |

use crate::domain::{CatalogError, Product, ProductDraft, Result};
use crate::transport::ProductApi;
use reqwest::blocking::{Client, RequestBuilder, Response};
use std::time::{Duration, Instant};

/// Products endpoint used when no `api_url` is configured.
pub const DEFAULT_API_URL: &str = "https://api.escuelajs.co/api/v1/products";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP implementation of [`ProductApi`].
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    base_url: String,
    client: Client,
}

impl Default for HttpProductApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl HttpProductApi {
    /// Creates a client for the products collection at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{id}", self.base_url)
    }

    fn send(operation: &str, request: RequestBuilder) -> Result<Response> {
        let started = Instant::now();
        let response = request
            .send()
            .map_err(|e| transport_error(operation, &e))?;

        tracing::debug!(
            operation = operation,
            status = response.status().as_u16(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "http response received"
        );

        response
            .error_for_status()
            .map_err(|e| transport_error(operation, &e))
    }
}

fn transport_error(operation: &str, err: &reqwest::Error) -> CatalogError {
    CatalogError::Transport(format!("{operation}: {err}"))
}

impl ProductApi for HttpProductApi {
    fn fetch_all(&mut self) -> Result<Vec<Product>> {
        let operation = "fetch products";
        Self::send(operation, self.client.get(&self.base_url))?
            .json()
            .map_err(|e| transport_error(operation, &e))
    }

    fn create(&mut self, draft: &ProductDraft) -> Result<Product> {
        let operation = "create product";
        Self::send(operation, self.client.post(&self.base_url).json(draft))?
            .json()
            .map_err(|e| transport_error(operation, &e))
    }

    fn update(&mut self, id: i64, draft: &ProductDraft) -> Result<Product> {
        let operation = "update product";
        Self::send(operation, self.client.put(self.item_url(id)).json(draft))?
            .json()
            .map_err(|e| transport_error(operation, &e))
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        Self::send("delete product", self.client.delete(self.item_url(id)))?;
        Ok(())
    }
}
