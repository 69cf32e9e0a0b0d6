//! Tracing initialization and subscriber setup.

use super::file_writer::RotatingFile;
use crate::infrastructure::paths::get_data_dir;
use crate::Config;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "catalog-console.log";

/// Installs the global subscriber writing plain-text events to the log file.
///
/// The filter comes from `RUST_LOG` when set, then `config.trace_level`, then
/// `"info"`. The terminal belongs to the console UI, so nothing is logged to
/// stdout or stderr.
///
/// Returns the log file path, or `None` when the data directory cannot be
/// created. Calling it again after a subscriber is installed has no effect.
///
/// # Example
///
/// ```rust
/// use catalog_console::observability::init_tracing;
/// use catalog_console::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return None;
    }
    let log_file = data_dir.join(LOG_FILE_NAME);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true)
        .with_writer(Mutex::new(RotatingFile::new(log_file.clone())));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();

    Some(log_file)
}
