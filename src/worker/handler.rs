//! Worker implementation for remote catalog calls.
//!
//! [`TransportWorker::handle_message`] is synchronous and usable directly (tests
//! do this). [`TransportWorker::spawn`] moves the worker onto a thread fed by a
//! channel, which is how the console binary runs it.

use crate::domain::{CatalogError, Result};
use crate::transport::ProductApi;
use crate::worker::{TransportOperation, TransportRequest, TransportResponse};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

/// Executes transport requests against a [`ProductApi`].
pub struct TransportWorker {
    api: Box<dyn ProductApi>,
}

impl std::fmt::Debug for TransportWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportWorker").finish_non_exhaustive()
    }
}

impl TransportWorker {
    #[must_use]
    pub fn new(api: Box<dyn ProductApi>) -> Self {
        Self { api }
    }

    /// Turns an API result into a response with consistent logging.
    fn handle_api_result<T, F>(operation: TransportOperation, result: Result<T>, on_success: F) -> TransportResponse
    where
        F: FnOnce(T) -> TransportResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation.describe(), "transport operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation.describe(), error = %e, "transport operation failed");
                TransportResponse::Error {
                    operation,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Runs one request and returns its response. Never panics on API errors.
    pub fn handle_message(&mut self, message: TransportRequest) -> TransportResponse {
        let operation = message.operation();
        let _span = tracing::debug_span!("worker_handle_message", operation = operation.describe()).entered();

        match message {
            TransportRequest::FetchAll => {
                Self::handle_api_result(operation, self.api.fetch_all(), |products| {
                    tracing::debug!(product_count = products.len(), "products fetched");
                    TransportResponse::ProductsLoaded { products }
                })
            }
            TransportRequest::Create { draft } => {
                Self::handle_api_result(operation, self.api.create(&draft), |product| {
                    TransportResponse::ProductCreated { product }
                })
            }
            TransportRequest::Update { id, draft } => {
                Self::handle_api_result(operation, self.api.update(id, &draft), |product| {
                    TransportResponse::ProductUpdated { id, product }
                })
            }
            TransportRequest::Delete { id } => {
                Self::handle_api_result(operation, self.api.delete(id), |()| {
                    TransportResponse::ProductDeleted { id }
                })
            }
        }
    }

    /// Moves the worker onto its own thread.
    ///
    /// Responses are converted with `From` and sent on `responses`, so the
    /// caller can merge them into its own event channel. The thread exits when
    /// the returned handle is dropped or the response receiver goes away.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the thread cannot be spawned.
    pub fn spawn<T>(mut self, responses: Sender<T>) -> Result<WorkerHandle>
    where
        T: From<TransportResponse> + Send + 'static,
    {
        let (requests, inbox) = mpsc::channel::<TransportRequest>();

        let thread = thread::Builder::new()
            .name("transport-worker".to_string())
            .spawn(move || {
                for request in inbox {
                    let response = self.handle_message(request);
                    if responses.send(T::from(response)).is_err() {
                        tracing::debug!("response receiver dropped, stopping worker");
                        break;
                    }
                }
            })?;

        Ok(WorkerHandle { requests, thread })
    }
}

/// Sending half of a spawned [`TransportWorker`].
#[derive(Debug)]
pub struct WorkerHandle {
    requests: Sender<TransportRequest>,
    thread: JoinHandle<()>,
}

impl WorkerHandle {
    /// Queues a request for the worker thread.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Transport`] if the worker thread has stopped.
    pub fn post(&self, request: TransportRequest) -> Result<()> {
        self.requests
            .send(request)
            .map_err(|e| CatalogError::Transport(format!("worker stopped: {}", e.0.operation().describe())))
    }

    /// Closes the request channel and waits for the thread to finish.
    pub fn shutdown(self) {
        drop(self.requests);
        if self.thread.join().is_err() {
            tracing::error!("transport worker panicked");
        }
    }
}
