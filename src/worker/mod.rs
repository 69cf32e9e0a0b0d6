//! Background worker for remote catalog calls.
//!
//! The worker owns a [`ProductApi`](crate::transport::ProductApi) and runs
//! requests on its own thread so the console keeps drawing while a call is in
//! flight.
//!
//! # Architecture
//!
//! - `messages`: request/response protocol types
//! - `handler`: worker implementation, message processing and thread spawning

pub mod handler;
pub mod messages;

pub use handler::{TransportWorker, WorkerHandle};
pub use messages::{TransportOperation, TransportRequest, TransportResponse};
