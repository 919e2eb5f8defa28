//! Pacviz binary entrypoint kept minimal. The full runtime lives in `app`.

mod app;
mod args;
mod events;
mod install;
mod logic;
mod sources;
mod state;
#[cfg(test)]
mod test_utils;
mod theme;
mod ui;
mod util;

use std::fmt;
use std::sync::{Arc, OnceLock};

use clap::Parser;

use crate::sources::{AurClient, HttpTransport, PackageSource, PacmanSource};

struct PacvizTimer;

impl tracing_subscriber::fmt::time::FormatTime for PacvizTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now()
            .format("%Y-%m-%dT%H:%M:%S%.3f")
            .to_string();
        w.write_str(&ts)
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Install the tracing subscriber.
///
/// Inputs:
/// - `level`: Fallback filter when `RUST_LOG` is unset
///
/// Details:
/// - Writes to `<config>/logs/pacviz.log`; falls back to stderr when the file
///   cannot be opened.
fn init_logging(level: &str) {
    let mut log_path = crate::theme::logs_dir();
    log_path.push("pacviz.log");
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(PacvizTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(PacvizTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

/// What: Load the start-up theme and apply config overrides.
///
/// Details:
/// - An unknown theme falls back to the default palette with a warning.
fn startup_theme(name: &str, overrides: &theme::ThemeColors) -> theme::Theme {
    let base = theme::load_theme(name).unwrap_or_else(|e| {
        tracing::warn!(theme = %name, error = %e, "falling back to default theme");
        theme::default_theme()
    });
    base.with_colors(overrides)
}

#[tokio::main]
async fn main() {
    let args = args::Args::parse();
    init_logging(&args::determine_log_level(&args));

    let config = match util::config::load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            eprintln!("pacviz: {e}");
            std::process::exit(1);
        }
    };

    let theme_overrides = config.theme.colors();
    let theme_name = args::resolve_theme_name(&args, &config);
    let theme = startup_theme(&theme_name, &theme_overrides);

    let source = PacmanSource::new(args.dry_run)
        .map(|s| Arc::new(s) as Arc<dyn PackageSource>)
        .map_err(|e| e.to_string());

    let aur: Option<Arc<AurClient<HttpTransport>>> = if config.aur.disabled || args.no_aur {
        tracing::info!("AUR disabled");
        None
    } else {
        match AurClient::http(config.aur.timeout(), config.aur.cache_ttl()) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                tracing::warn!(error = %e, "AUR client unavailable");
                None
            }
        }
    };

    let helper = install::detect_helper(config.aur.helper.as_deref());
    let privileged = install::is_privileged();
    tracing::info!(
        dry_run = args.dry_run,
        theme = %theme.name,
        aur = aur.is_some(),
        helper = helper.as_deref().unwrap_or("none"),
        privileged,
        "Pacviz starting"
    );

    let options = app::RunOptions {
        source,
        aur,
        theme,
        theme_overrides,
        helper,
        privileged,
        dry_run: args.dry_run,
    };
    if let Err(err) = app::run(options).await {
        tracing::error!(error = ?err, "Application error");
        eprintln!("pacviz: {err}");
    }
    tracing::info!("Pacviz exited");
}

#[cfg(test)]
mod tests {
    /// What: FormatTime impl writes a non-empty timestamp without panicking
    ///
    /// - Input: Tracing writer buffer
    /// - Output: Buffer receives some content
    #[test]
    fn pacviz_timer_formats_time_without_panic() {
        use tracing_subscriber::fmt::time::FormatTime;
        let mut buf = String::new();
        let mut writer = tracing_subscriber::fmt::format::Writer::new(&mut buf);
        let t = super::PacvizTimer;
        let _ = t.format_time(&mut writer);
        assert!(!buf.is_empty());
    }

    #[test]
    /// What: Unknown theme names fall back to the default palette with overrides applied.
    fn startup_theme_falls_back() {
        let overrides = crate::theme::ThemeColors {
            accent1: Some("#010203".into()),
            ..crate::theme::ThemeColors::default()
        };
        let theme = super::startup_theme("no-such-theme-xyz", &overrides);
        assert_eq!(theme.accent1, ratatui::style::Color::Rgb(1, 2, 3));
        assert_eq!(theme.background, crate::theme::default_theme().background);
    }
}
