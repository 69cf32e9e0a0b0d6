//! Structured logging to a rotating file.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → RotatingFile → catalog-console.log
//! ```
//!
//! # Features
//!
//! - **File Output**: `<data dir>/catalog-console/catalog-console.log`, so log
//!   lines never interleave with the console UI
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
pub mod init;

pub use init::{init_tracing, LOG_FILE_NAME};
