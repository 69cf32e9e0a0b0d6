//! Command-line arguments for the console binary.
//!
//! Flags override values read from `--config`, which in turn override the
//! built-in defaults.

use crate::{Config, Result};
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "catalog-console")]
#[command(about = "Terminal admin console for a REST product catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Products collection endpoint
    #[arg(long)]
    pub api_url: Option<String>,

    /// Products per page
    #[arg(long)]
    pub page_size: Option<NonZeroUsize>,

    /// Typing pause in milliseconds before `type` input is searched
    #[arg(long)]
    pub search_debounce_ms: Option<u64>,

    /// Built-in theme name
    #[arg(long, alias = "theme-name")]
    pub theme: Option<String>,

    /// Custom TOML theme file
    #[arg(long, value_name = "FILE")]
    pub theme_file: Option<String>,

    /// Tracing filter, e.g. `debug`
    #[arg(long)]
    pub trace_level: Option<String>,

    /// Directory CSV exports are written to
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<String>,
}

impl Cli {
    /// Builds the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`](crate::CatalogError::Config) if the
    /// `--config` file cannot be read or parsed.
    pub fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(api_url) = self.api_url {
            config.api_url = api_url;
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size.get();
        }
        if let Some(ms) = self.search_debounce_ms {
            config.search_debounce_ms = ms;
        }
        if self.theme.is_some() {
            config.theme_name = self.theme;
        }
        if self.theme_file.is_some() {
            config.theme_file = self.theme_file;
        }
        if self.trace_level.is_some() {
            config.trace_level = self.trace_level;
        }
        if self.export_dir.is_some() {
            config.export_dir = self.export_dir;
        }

        Ok(config)
    }
}
