use ratatui::style::Color;

use super::types::{Theme, ThemeColors};

/// Names of the themes compiled into the binary.
pub const BUILTIN_THEMES: [&str; 5] = ["default", "tokyo-night", "catppuccin-mocha", "gruvbox", "nord"];

/// Black and white palette that works on any terminal.
#[must_use]
pub fn default_theme() -> Theme {
    let white = Color::Rgb(0xff, 0xff, 0xff);
    Theme {
        name: "default".into(),
        accent1: white,
        accent2: white,
        accent3: white,
        accent4: white,
        accent5: white,
        background: Color::Rgb(0, 0, 0),
        background_alt: Color::Rgb(0, 0, 0),
        foreground: white,
        selected: white,
        dimmed: Color::Rgb(0x80, 0x80, 0x80),
        remote_accent: white,
        warning_accent: white,
    }
}

/// Build a [`ThemeColors`] from a fixed palette.
fn palette(name: &str, c: [&str; 12]) -> ThemeColors {
    let s = |i: usize| Some(c[i].to_string());
    ThemeColors {
        name: Some(name.to_string()),
        accent1: s(0),
        accent2: s(1),
        accent3: s(2),
        accent4: s(3),
        accent5: s(4),
        background: s(5),
        background_alt: s(6),
        foreground: s(7),
        selected: s(8),
        dimmed: s(9),
        remote_accent: s(10),
        warning_accent: s(11),
    }
}

/// What: Look up a built-in theme.
///
/// Output:
/// - `None` for unknown names
#[must_use]
pub fn builtin_theme(name: &str) -> Option<Theme> {
    let colors = match name {
        "default" => return Some(default_theme()),
        "tokyo-night" => palette(
            name,
            [
                "#7aa2f7", "#bb9af7", "#9ece6a", "#e0af68", "#f7768e", "#1a1b26", "#16161e",
                "#c0caf5", "#283457", "#565f89", "#e0af68", "#ff9e64",
            ],
        ),
        "catppuccin-mocha" => palette(
            name,
            [
                "#89b4fa", "#cba6f7", "#a6e3a1", "#f9e2af", "#f38ba8", "#1e1e2e", "#181825",
                "#cdd6f4", "#45475a", "#6c7086", "#f9e2af", "#fab387",
            ],
        ),
        "gruvbox" => palette(
            name,
            [
                "#83a598", "#d3869b", "#b8bb26", "#fabd2f", "#fb4934", "#282828", "#1d2021",
                "#ebdbb2", "#504945", "#928374", "#fabd2f", "#fe8019",
            ],
        ),
        "nord" => palette(
            name,
            [
                "#88c0d0", "#b48ead", "#a3be8c", "#ebcb8b", "#bf616a", "#2e3440", "#3b4252",
                "#eceff4", "#434c5e", "#4c566a", "#ebcb8b", "#d08770",
            ],
        ),
        _ => return None,
    };
    Some(default_theme().with_colors(&colors))
}
