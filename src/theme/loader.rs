//! Theme lookup across user, system, and built-in locations.

use std::path::{Path, PathBuf};

use super::builtin::{builtin_theme, default_theme};
use super::paths::{SYSTEM_THEME_DIR, themes_dir};
use super::types::{Theme, ThemeColors};

/// What: Parse a theme file on top of the default theme.
///
/// Inputs:
/// - `path`: TOML theme file
/// - `name`: Name used when the file has no `name` key
///
/// # Errors
/// - Returns `Err` when the file cannot be read or is not valid TOML
pub fn load_theme_file(path: &Path, name: &str) -> Result<Theme, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read theme {}: {e}", path.display()))?;
    let colors: ThemeColors = toml::from_str(&text)
        .map_err(|e| format!("failed to parse theme {}: {e}", path.display()))?;
    let mut theme = default_theme().with_colors(&colors);
    if colors.name.is_none() {
        theme.name = name.to_string();
    }
    Ok(theme)
}

/// What: Load a theme by name from explicit directories, then the built-ins.
///
/// Inputs:
/// - `name`: Theme name, looked up as `<dir>/<name>.toml`
/// - `dirs`: Directories in priority order
///
/// # Errors
/// - Returns `Err` when no directory has the file and no built-in matches,
///   or when the first file found is invalid
pub fn load_theme_from(name: &str, dirs: &[PathBuf]) -> Result<Theme, String> {
    if name.contains('/') || name.contains("..") {
        return Err(format!("invalid theme name: {name}"));
    }
    for dir in dirs {
        let path = dir.join(format!("{name}.toml"));
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading theme file");
            return load_theme_file(&path, name);
        }
    }
    builtin_theme(name).ok_or_else(|| format!("theme not found: {name}"))
}

/// Load a theme from the user directory, the system directory, or the built-ins.
///
/// # Errors
/// - Returns `Err` when the theme cannot be found or parsed
pub fn load_theme(name: &str) -> Result<Theme, String> {
    load_theme_from(name, &[themes_dir(), PathBuf::from(SYSTEM_THEME_DIR)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    /// What: A user file wins over a built-in of the same name and missing keys fall back.
    fn user_file_overrides_builtin() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("nord.toml"),
            "accent1 = \"#010203\"\nforeground = \"4,5,6\"\n",
        )
        .expect("write theme");
        let theme = load_theme_from("nord", &[dir.path().to_path_buf()]).expect("theme");
        assert_eq!(theme.name, "nord");
        assert_eq!(theme.accent1, Color::Rgb(1, 2, 3));
        assert_eq!(theme.foreground, Color::Rgb(4, 5, 6));
        assert_eq!(theme.dimmed, default_theme().dimmed);
    }

    #[test]
    /// What: Unknown names fail, built-ins resolve without files, bad TOML reports an error.
    fn lookup_failures_and_fallbacks() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dirs = [dir.path().to_path_buf()];
        assert!(load_theme_from("gruvbox", &dirs).is_ok());
        assert_eq!(
            load_theme_from("nope", &dirs),
            Err("theme not found: nope".to_string())
        );
        std::fs::write(dir.path().join("broken.toml"), "accent1 = [").expect("write");
        assert!(load_theme_from("broken", &dirs).is_err());
        assert!(load_theme_from("../etc", &dirs).is_err());
    }
}
