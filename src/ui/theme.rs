//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents mapping UI roles to hex colors. Two are built in
//! and embedded at compile time; any other can be loaded from a file.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme (default)
//! - `catppuccin-latte`: Light theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! header_bg = "#313244"        # optional
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! accent_fg = "#1e1e2e"
//! accent_bg = "#89b4fa"
//! price_fg = "#a6e3a1"
//! category_fg = "#94e2d5"
//! empty_state_fg = "#89b4fa"
//! success_fg = "#a6e3a1"
//! error_fg = "#f38ba8"
//! warning_fg = "#f9e2af"
//! ```
//!
//! # Example
//!
//! ```rust
//! use catalog_console::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! let line = format!("{}Bold{}", Theme::bold(), Theme::reset());
//! assert!(line.ends_with("\u{1b}[0m"));
//! assert_eq!(theme.name, "catppuccin-latte");
//! ```

use crate::app::notification::NotificationKind;
use crate::domain::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Footer, placeholders and secondary info.
    pub text_dim: String,

    pub border: String,
    pub search_bar_border: String,

    /// Active page and sort indicator, drawn on `accent_bg`.
    pub accent_fg: String,
    pub accent_bg: String,

    pub price_fg: String,
    pub category_fg: String,
    pub empty_state_fg: String,

    pub success_fg: String,
    pub error_fg: String,
    pub warning_fg: String,
}

impl ThemeColors {
    /// Color for a notification of the given kind.
    #[must_use]
    pub fn notification(&self, kind: NotificationKind) -> &str {
        match kind {
            NotificationKind::Success => &self.success_fg,
            NotificationKind::Error => &self.error_fg,
            NotificationKind::Warning => &self.warning_fg,
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name. Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| CatalogError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| CatalogError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Converts a hex color to RGB. Malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape sequence for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape sequence for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the Catppuccin Mocha theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in catppuccin-mocha theme should always parse")
    }
}
