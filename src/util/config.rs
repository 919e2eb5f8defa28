//! Configuration file loading.
//!
//! The config file is TOML. Every key is optional; a missing file yields the
//! defaults.
//!
//! ```toml
//! selected_theme = "tokyo-night"
//!
//! [aur]
//! helper = "paru"
//! disabled = false
//! timeout = 5
//! cache_ttl = 300
//!
//! [theme]
//! accent1 = "#7aa2f7"
//!
//! [theme.overrides]
//! background = "#000000"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::sources::aur::{DEFAULT_CACHE_TTL, DEFAULT_TIMEOUT};
use crate::theme::ThemeColors;

/// Top-level configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Theme loaded at startup.
    pub selected_theme: Option<String>,
    /// AUR client settings.
    pub aur: AurConfig,
    /// Inline color overrides applied over the selected theme.
    pub theme: ThemeSection,
}

/// `[aur]` table.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AurConfig {
    /// Helper binary to use instead of auto-detection.
    pub helper: Option<String>,
    /// Disable AUR search entirely.
    pub disabled: bool,
    /// Request timeout in seconds; `0` keeps the default.
    pub timeout: u64,
    /// Cache lifetime in seconds; `0` keeps the default.
    pub cache_ttl: u64,
}

impl AurConfig {
    /// Effective request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        if self.timeout == 0 {
            DEFAULT_TIMEOUT
        } else {
            Duration::from_secs(self.timeout)
        }
    }

    /// Effective cache lifetime.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        if self.cache_ttl == 0 {
            DEFAULT_CACHE_TTL
        } else {
            Duration::from_secs(self.cache_ttl)
        }
    }
}

/// `[theme]` table: flat color keys plus an optional nested `overrides` table.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeSection {
    /// Color keys written directly under `[theme]`.
    #[serde(flatten)]
    pub flat: ThemeColors,
    /// Color keys under `[theme.overrides]`; these win over flat keys.
    pub overrides: ThemeColors,
}

impl ThemeSection {
    /// Combined overrides with nested values taking precedence.
    #[must_use]
    pub fn colors(&self) -> ThemeColors {
        self.flat.clone().merged_with(self.overrides.clone())
    }
}

/// What: Parse configuration text.
///
/// # Errors
/// - Returns `Err` with the TOML error message when the text is invalid
pub fn parse_config(text: &str) -> Result<Config, String> {
    toml::from_str(text).map_err(|e| format!("invalid config: {e}"))
}

/// What: Load configuration from disk.
///
/// Inputs:
/// - `path`: Explicit config path; `None` uses the default location
///
/// Output:
/// - Defaults when the file does not exist
///
/// # Errors
/// - Returns `Err` when the file exists but cannot be read or parsed
///
/// Details:
/// - An explicit path that does not exist is an error; a missing default file is not
pub fn load_config(path: Option<&Path>) -> Result<Config, String> {
    let default_path = crate::theme::config_file();
    let (path, explicit) = path.map_or((default_path.as_path(), false), |p| (p, true));
    if !path.exists() {
        if explicit {
            return Err(format!("config file not found: {}", path.display()));
        }
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let config = parse_config(&text)?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Full config parses, nested theme overrides win, zero durations fall back.
    fn parses_full_config() {
        let config = parse_config(
            r##"
selected_theme = "nord"

[aur]
helper = "paru"
timeout = 0
cache_ttl = 60

[theme]
accent1 = "#111111"
dimmed = "#222222"

[theme.overrides]
accent1 = "#333333"
"##,
        )
        .expect("valid config");
        assert_eq!(config.selected_theme.as_deref(), Some("nord"));
        assert_eq!(config.aur.helper.as_deref(), Some("paru"));
        assert!(!config.aur.disabled);
        assert_eq!(config.aur.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.aur.cache_ttl(), Duration::from_secs(60));
        let colors = config.theme.colors();
        assert_eq!(colors.accent1.as_deref(), Some("#333333"));
        assert_eq!(colors.dimmed.as_deref(), Some("#222222"));
    }

    #[test]
    /// What: Empty text yields defaults and invalid TOML is an error.
    fn empty_and_invalid() {
        assert_eq!(parse_config("").expect("empty"), Config::default());
        assert!(parse_config("[aur\n").is_err());
    }

    #[test]
    /// What: Explicit missing path fails, existing file loads.
    fn load_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        assert!(load_config(Some(&path)).is_err());
        std::fs::write(&path, "[aur]\ndisabled = true\n").expect("write");
        let config = load_config(Some(&path)).expect("config");
        assert!(config.aur.disabled);
    }
}
