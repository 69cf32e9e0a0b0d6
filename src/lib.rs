//! Catalog Console: a terminal admin console for a REST product catalog.
//!
//! The console loads a product catalog from a remote JSON API and provides:
//! - Case-insensitive title search, applied after a short typing pause
//! - Sorting by title or price, with direction toggling
//! - Pagination with a configurable page size
//! - Create, edit and delete through the remote API, with confirmation
//! - CSV export of the current page
//! - A stats panel, detail view and toast notifications

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Console runtime (main.rs)                          │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Collection pipeline, record editor               │  ← Business logic
//! │  - Event handling, action dispatching               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Transport     │   │ Worker Layer  │
//! │ (ui/)         │   │ (transport/)  │   │ (worker/)     │
//! │ - Projection  │   │ - ProductApi  │   │ - Request     │
//! │ - Rendering   │   │ - HTTP client │   │   thread      │
//! │ - Theming     │   │ - In-memory   │   │ - Responses   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, formatting, export, infrastructure         │
//! │  - Product model and errors (domain/)               │
//! │  - Display formatting (format), CSV (export)        │
//! │  - Platform paths (infrastructure/)                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing to a rotating log file                   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Given as command-line flags (see [`cli::Cli`]), or in a TOML file passed
//! with `--config`:
//!
//! ```toml
//! api_url = "https://api.escuelajs.co/api/v1/products"
//! page_size = 10
//! search_debounce_ms = 300
//! theme_name = "catppuccin-mocha"
//! export_dir = "~/catalog-exports"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use catalog_console::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (render, actions) = handle_event(&mut state, &Event::Load)?;
//! assert!(render);
//! assert_eq!(actions.len(), 1); // fetch request for the worker
//! # Ok::<(), catalog_console::CatalogError>(())
//! ```

pub mod app;
pub mod cli;
pub mod domain;
pub mod export;
pub mod format;
pub mod infrastructure;
pub mod observability;
pub mod transport;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, ViewMode};
pub use domain::{CatalogError, Category, Product, ProductDraft, Result};
pub use ui::Theme;

use app::debounce::DEFAULT_SEARCH_DEBOUNCE;
use app::pipeline::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use transport::DEFAULT_API_URL;

/// Console configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Products collection endpoint. Items live at `<api_url>/<id>`.
    pub api_url: String,

    /// Products per page. Zero falls back to the default of 10.
    pub page_size: usize,

    /// Typing pause before `type` input is applied as a search.
    pub search_debounce_ms: u64,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`. Ignored if
    /// `theme_file` is set.
    #[serde(alias = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Tracing filter, e.g. `debug` or `catalog_console=trace`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Directory CSV exports are written to. Default: `<data dir>/exports`
    pub export_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: u64::try_from(DEFAULT_SEARCH_DEBOUNCE.as_millis()).unwrap_or(300),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            export_dir: None,
        }
    }
}

impl Config {
    /// Reads configuration from a TOML file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Config(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| CatalogError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Page size as a non-zero count.
    #[must_use]
    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.page_size)
            .or_else(|| NonZeroUsize::new(DEFAULT_PAGE_SIZE))
            .unwrap_or(NonZeroUsize::MIN)
    }

    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Resolved export directory, with `~` expanded.
    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.as_deref().map_or_else(
            infrastructure::default_export_dir,
            infrastructure::expand_tilde,
        )
    }
}

/// Creates the initial `AppState` from configuration.
///
/// The theme comes from `theme_file` if set, else `theme_name`, else the
/// default; a theme that fails to load falls back to the default.
///
/// # Example
///
/// ```rust
/// use catalog_console::{initialize, Config};
///
/// let config = Config {
///     theme_name: Some("catppuccin-latte".to_string()),
///     page_size: 5,
///     ..Default::default()
/// };
///
/// let state = initialize(&config);
/// assert_eq!(state.theme.name, "catppuccin-latte");
/// assert_eq!(state.pipeline.pagination().page_size.get(), 5);
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, page_size = config.page_size, "initializing catalog console");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(
                Theme::default,
                |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                        Theme::default()
                    })
                },
            )
        },
        |theme_file| {
            Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::with_settings(theme, config.page_size(), config.search_debounce())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn zero_page_size_falls_back_to_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = 0\ntheme = \"catppuccin-latte\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.page_size().get(), DEFAULT_PAGE_SIZE);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    }

    #[test]
    fn from_file_fills_missing_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = 20\nexport_dir = \"/tmp/exports\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = \"many\"").unwrap();
        assert!(matches!(Config::from_file(file.path()), Err(CatalogError::Config(_))));
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("solarized".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme, Theme::default());
    }
}
