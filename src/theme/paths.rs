use std::env;
use std::path::PathBuf;

/// Application directory name under the config base.
const APP_DIR: &str = "pacviz";

/// System-wide theme directory.
pub const SYSTEM_THEME_DIR: &str = "/usr/share/pacviz/themes";

/// What: Resolve the config directory from explicit environment values.
///
/// Inputs:
/// - `xdg_config_home`: Value of `XDG_CONFIG_HOME`, if set
/// - `home`: Value of `HOME`, if set
///
/// Output:
/// - `$XDG_CONFIG_HOME/pacviz` when non-empty, else `$HOME/.config/pacviz`,
///   else `./.config/pacviz`
#[must_use]
pub fn config_dir_from(xdg_config_home: Option<&str>, home: Option<&str>) -> PathBuf {
    if let Some(xdg) = xdg_config_home.filter(|p| !p.trim().is_empty()) {
        return PathBuf::from(xdg).join(APP_DIR);
    }
    PathBuf::from(home.unwrap_or("."))
        .join(".config")
        .join(APP_DIR)
}

/// Config directory for pacviz (not created).
#[must_use]
pub fn config_dir() -> PathBuf {
    let xdg = env::var("XDG_CONFIG_HOME").ok();
    let home = env::var("HOME").ok();
    config_dir_from(xdg.as_deref(), home.as_deref())
}

/// Default config file path.
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// User theme directory under the config directory.
#[must_use]
pub fn themes_dir() -> PathBuf {
    config_dir().join("themes")
}

/// Logs directory under config: `<config>/logs` (ensured to exist).
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}
