use std::io::Stdout;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::select;

use crate::events::{handle_event, handle_message, handle_resize};
use crate::install::run_helper;
use crate::sources::{AurClient, PackageSource, RpcTransport};
use crate::state::{AppMessage, AppState, Effect};
use crate::theme::{Theme, ThemeColors};
use crate::ui::ui;

use super::terminal::{restore_terminal, setup_terminal};

mod background;
mod workers;

use background::{Channels, spawn_event_thread};
pub use workers::Workers;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Time given to the event thread to notice a pause.
const PAUSE_GRACE: Duration = Duration::from_millis(60);

/// Everything the runtime needs from start-up.
pub struct RunOptions<T: RpcTransport> {
    /// Package database, or the reason it could not be opened.
    pub source: std::result::Result<Arc<dyn PackageSource>, String>,
    /// AUR client; `None` disables AUR search and reclassification.
    pub aur: Option<Arc<AurClient<T>>>,
    /// Initial theme, overrides already applied.
    pub theme: Theme,
    /// Config overrides re-applied on `:theme`.
    pub theme_overrides: ThemeColors,
    /// Detected AUR helper.
    pub helper: Option<String>,
    /// Process runs as root.
    pub privileged: bool,
    /// Describe commands instead of running them.
    pub dry_run: bool,
}

/// Whether the loop continues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    /// Keep running.
    Continue,
    /// Leave the loop.
    Quit,
}

/// What: Run the application until the user quits.
///
/// Inputs:
/// - `options`: Package source, AUR client, theme, and privilege settings
///
/// Output:
/// - `Ok(())` on a clean exit; `Err` on terminal failures
///
/// Details:
/// - `PACVIZ_TEST_HEADLESS=1` skips terminal setup, rendering, and the event
///   reader so the loop can be smoke-tested.
/// - A source that failed to open leaves the application on the error screen.
pub async fn run<T: RpcTransport + 'static>(options: RunOptions<T>) -> Result<()> {
    let headless = std::env::var("PACVIZ_TEST_HEADLESS").ok().as_deref() == Some("1");
    if !headless {
        setup_terminal()?;
    }
    let mut terminal = if headless {
        None
    } else {
        Some(Terminal::new(CrosstermBackend::new(std::io::stdout()))?)
    };

    let mut app = AppState {
        aur_enabled: options.aur.is_some(),
        helper: options.helper,
        privileged: options.privileged,
        dry_run: options.dry_run,
        theme: options.theme,
        theme_overrides: options.theme_overrides,
        ..AppState::default()
    };
    if !headless && let Ok((_, rows)) = crossterm::terminal::size() {
        handle_resize(&mut app, rows);
    }

    let mut channels = Channels::new();
    spawn_event_thread(
        headless,
        channels.event_tx.clone(),
        Arc::clone(&channels.event_thread_cancelled),
        Arc::clone(&channels.event_thread_paused),
    );

    let workers = match options.source {
        Ok(source) => {
            let workers = Workers::new(source, options.aur, channels.msg_tx.clone());
            workers.execute(Effect::LoadPackages);
            Some(workers)
        }
        Err(e) => {
            tracing::error!(error = %e, "package source unavailable");
            app.loading = false;
            app.fatal_error = Some(e);
            None
        }
    };

    loop {
        if let Some(t) = terminal.as_mut() {
            let _ = t.draw(|f| ui(f, &app));
        }

        let effects = select! {
            Some(ev) = channels.event_rx.recv() => handle_event(&ev, &mut app),
            Some(msg) = channels.msg_rx.recv() => handle_message(&mut app, msg),
            else => break,
        };
        let flow = apply_effects(
            effects,
            &app,
            workers.as_ref(),
            &channels,
            &mut terminal,
            headless,
        );
        if flow == Flow::Quit {
            break;
        }
    }

    channels
        .event_thread_cancelled
        .store(true, Ordering::Relaxed);
    if !headless {
        restore_terminal()?;
    }
    tracing::info!("event loop finished");
    Ok(())
}

/// What: Execute the effects returned by a handler.
///
/// Details:
/// - The helper run happens inline and reports through the message channel.
fn apply_effects<T: RpcTransport + 'static>(
    effects: Vec<Effect>,
    app: &AppState,
    workers: Option<&Workers<T>>,
    channels: &Channels,
    terminal: &mut Option<Terminal<CrosstermBackend<Stdout>>>,
    headless: bool,
) -> Flow {
    for effect in effects {
        tracing::trace!(effect = ?effect, "effect");
        match effect {
            Effect::Quit => return Flow::Quit,
            Effect::HelperInstall { helper, name } => {
                let result = tokio::task::block_in_place(|| {
                    run_helper_in_foreground(&helper, &name, app.dry_run, channels, terminal, headless)
                });
                let _ = channels.msg_tx.send(AppMessage::HelperDone { name, result });
            }
            other => {
                if let Some(w) = workers {
                    w.execute(other);
                }
            }
        }
    }
    Flow::Continue
}

/// What: Hand the terminal to the AUR helper and take it back afterwards.
///
/// Details:
/// - The event reader is paused so it does not steal the helper's input.
fn run_helper_in_foreground(
    helper: &str,
    name: &str,
    dry_run: bool,
    channels: &Channels,
    terminal: &mut Option<Terminal<CrosstermBackend<Stdout>>>,
    headless: bool,
) -> std::result::Result<bool, String> {
    channels.event_thread_paused.store(true, Ordering::Relaxed);
    std::thread::sleep(PAUSE_GRACE);
    if !headless && let Err(e) = restore_terminal() {
        tracing::warn!(error = %e, "failed to restore terminal before helper");
    }
    let result = run_helper(helper, name, dry_run);
    if !headless {
        if let Err(e) = setup_terminal() {
            tracing::warn!(error = %e, "failed to re-initialise terminal after helper");
        }
        if let Some(t) = terminal.as_mut() {
            let _ = t.clear();
        }
    }
    channels.event_thread_paused.store(false, Ordering::Relaxed);
    result
}
