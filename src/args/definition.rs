//! Command-line argument definition.

use std::path::PathBuf;

use clap::Parser;

/// Pacviz - an interactive terminal browser for Arch and AUR packages
#[derive(Parser, Debug, Default)]
#[command(name = "pacviz")]
#[command(version)]
#[command(about = "An interactive terminal browser for Arch and AUR packages", long_about = None)]
pub struct Args {
    /// Read configuration from this file instead of ~/.config/pacviz/config.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start with this theme (overrides `selected_theme` in the config)
    #[arg(long, value_name = "NAME")]
    pub theme: Option<String>,

    /// Disable AUR search and foreign-package lookups
    #[arg(long)]
    pub no_aur: bool,

    /// Describe install/remove commands instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Every flag parses into its field.
    fn parses_all_flags() {
        let args = Args::try_parse_from([
            "pacviz",
            "--config",
            "/tmp/c.toml",
            "--theme",
            "nord",
            "--no-aur",
            "--dry-run",
            "--log-level",
            "warn",
            "-v",
        ])
        .expect("valid arguments");
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(args.theme.as_deref(), Some("nord"));
        assert!(args.no_aur);
        assert!(args.dry_run);
        assert_eq!(args.log_level, "warn");
        assert!(args.verbose);
    }

    #[test]
    /// What: Defaults apply when no flags are given; unknown flags are rejected.
    fn defaults_and_unknown_flags() {
        let args = Args::try_parse_from(["pacviz"]).expect("no arguments");
        assert_eq!(args.log_level, "info");
        assert!(args.config.is_none());
        assert!(!args.no_aur);
        assert!(Args::try_parse_from(["pacviz", "--install", "foo"]).is_err());
    }
}
