use ratatui::style::Color;
use serde::Deserialize;

use super::parsing::parse_color_value;

/// Application theme palette used by rendering code.
///
/// The active theme is owned by the application state and passed to every
/// render call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Theme name.
    pub name: String,
    /// Headers, palette command names.
    pub accent1: Color,
    /// Footer and preset label.
    pub accent2: Color,
    /// Success messages.
    pub accent3: Color,
    /// Palette argument hints, spinner.
    pub accent4: Color,
    /// Errors.
    pub accent5: Color,
    /// Canvas background.
    pub background: Color,
    /// Background of alternate rows.
    pub background_alt: Color,
    /// Primary text.
    pub foreground: Color,
    /// Selected row background.
    pub selected: Color,
    /// Low-emphasis text.
    pub dimmed: Color,
    /// Status bar accent in remote search view.
    pub remote_accent: Color,
    /// Status bar accent for confirmations of destructive actions.
    pub warning_accent: Color,
}

/// Optional color values as written in theme files and the `[theme]` config table.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeColors {
    /// Theme name (theme files only).
    pub name: Option<String>,
    /// See [`Theme::accent1`].
    pub accent1: Option<String>,
    /// See [`Theme::accent2`].
    pub accent2: Option<String>,
    /// See [`Theme::accent3`].
    pub accent3: Option<String>,
    /// See [`Theme::accent4`].
    pub accent4: Option<String>,
    /// See [`Theme::accent5`].
    pub accent5: Option<String>,
    /// See [`Theme::background`].
    pub background: Option<String>,
    /// See [`Theme::background_alt`].
    pub background_alt: Option<String>,
    /// See [`Theme::foreground`].
    pub foreground: Option<String>,
    /// See [`Theme::selected`].
    pub selected: Option<String>,
    /// See [`Theme::dimmed`].
    pub dimmed: Option<String>,
    /// See [`Theme::remote_accent`].
    pub remote_accent: Option<String>,
    /// See [`Theme::warning_accent`].
    pub warning_accent: Option<String>,
}

impl ThemeColors {
    /// What: Overlay `other` on top of `self`.
    ///
    /// Output:
    /// - Values from `other` where set, otherwise from `self`
    #[must_use]
    pub fn merged_with(self, other: Self) -> Self {
        Self {
            name: other.name.or(self.name),
            accent1: other.accent1.or(self.accent1),
            accent2: other.accent2.or(self.accent2),
            accent3: other.accent3.or(self.accent3),
            accent4: other.accent4.or(self.accent4),
            accent5: other.accent5.or(self.accent5),
            background: other.background.or(self.background),
            background_alt: other.background_alt.or(self.background_alt),
            foreground: other.foreground.or(self.foreground),
            selected: other.selected.or(self.selected),
            dimmed: other.dimmed.or(self.dimmed),
            remote_accent: other.remote_accent.or(self.remote_accent),
            warning_accent: other.warning_accent.or(self.warning_accent),
        }
    }
}

impl Theme {
    /// What: Apply color overrides on top of this theme.
    ///
    /// Inputs:
    /// - `colors`: Values to apply; missing or unparsable ones keep the current color
    ///
    /// Output:
    /// - New theme; the name changes only when `colors.name` is set
    #[must_use]
    pub fn with_colors(&self, colors: &ThemeColors) -> Self {
        let pick = |value: &Option<String>, fallback: Color| {
            value
                .as_deref()
                .and_then(parse_color_value)
                .unwrap_or(fallback)
        };
        Self {
            name: colors.name.clone().unwrap_or_else(|| self.name.clone()),
            accent1: pick(&colors.accent1, self.accent1),
            accent2: pick(&colors.accent2, self.accent2),
            accent3: pick(&colors.accent3, self.accent3),
            accent4: pick(&colors.accent4, self.accent4),
            accent5: pick(&colors.accent5, self.accent5),
            background: pick(&colors.background, self.background),
            background_alt: pick(&colors.background_alt, self.background_alt),
            foreground: pick(&colors.foreground, self.foreground),
            selected: pick(&colors.selected, self.selected),
            dimmed: pick(&colors.dimmed, self.dimmed),
            remote_accent: pick(&colors.remote_accent, self.remote_accent),
            warning_accent: pick(&colors.warning_accent, self.warning_accent),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        super::builtin::default_theme()
    }
}
