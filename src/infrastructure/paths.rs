//! Filesystem locations used by the console.
//!
//! Logs live in the per-user data directory; CSV exports default to a
//! subdirectory of it. Configured paths may start with `~`.

use std::path::PathBuf;

const APP_DIR: &str = "catalog-console";
const EXPORT_DIR: &str = "exports";

/// Returns the data directory for logs and exports.
///
/// `<data_local_dir>/catalog-console`, e.g. `~/.local/share/catalog-console` on
/// Linux. Falls back to the working directory when the platform reports none.
///
/// # Examples
///
/// ```
/// use catalog_console::infrastructure::get_data_dir;
///
/// assert!(get_data_dir().ends_with("catalog-console"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Where CSV exports go when no `export_dir` is configured.
#[must_use]
pub fn default_export_dir() -> PathBuf {
    get_data_dir().join(EXPORT_DIR)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde, or when no home directory is known, are returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use catalog_console::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/exports"), home.join("exports"));
            assert_eq!(expand_tilde("~"), home);
        }
        assert_eq!(expand_tilde("exports/~"), PathBuf::from("exports/~"));
    }

    #[test]
    fn export_dir_is_inside_data_dir() {
        assert!(default_export_dir().starts_with(get_data_dir()));
    }
}
