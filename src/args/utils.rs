//! Shared helpers for argument processing.

use crate::args::Args;
use crate::util::config::Config;

/// What: Determine the log level from the command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - `--verbose` overrides `--log-level`.
#[must_use]
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Pick the theme to start with.
///
/// Output:
/// - `--theme`, else the configured `selected_theme`, else `"default"`
#[must_use]
pub fn resolve_theme_name(args: &Args, config: &Config) -> String {
    args.theme
        .clone()
        .or_else(|| config.selected_theme.clone())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "default".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Verbose wins over the explicit level.
    fn verbose_forces_debug() {
        let mut args = Args {
            log_level: "warn".into(),
            ..Args::default()
        };
        assert_eq!(determine_log_level(&args), "warn");
        args.verbose = true;
        assert_eq!(determine_log_level(&args), "debug");
    }

    #[test]
    /// What: Flag beats config, config beats the default.
    fn theme_precedence() {
        let config = Config {
            selected_theme: Some("nord".into()),
            ..Config::default()
        };
        let mut args = Args::default();
        assert_eq!(resolve_theme_name(&args, &config), "nord");
        assert_eq!(resolve_theme_name(&args, &Config::default()), "default");
        args.theme = Some("gruvbox".into());
        assert_eq!(resolve_theme_name(&args, &config), "gruvbox");
    }
}
