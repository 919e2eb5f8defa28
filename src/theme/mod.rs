//! Theme palette, built-in themes, theme file loading, and config paths.

/// Built-in palettes.
mod builtin;
/// Theme file lookup.
mod loader;
/// Color value parsing.
mod parsing;
/// Path resolution for config directories.
mod paths;
/// Theme type definitions.
mod types;

pub use builtin::{BUILTIN_THEMES, builtin_theme, default_theme};
pub use loader::{load_theme, load_theme_file, load_theme_from};
pub use parsing::parse_color_value;
pub use paths::{config_dir, config_file, logs_dir, themes_dir};
pub use types::{Theme, ThemeColors};
