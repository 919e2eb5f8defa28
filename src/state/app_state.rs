//! Controller state: viewport, input mode, remote search, and operations.

use zeroize::Zeroizing;

use super::types::{ColumnKind, Package};
use crate::logic::{Preset, SearchJoin, Viewport, default_presets};
use crate::theme::{Theme, ThemeColors};

/// Spinner animation frames.
pub const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Keyboard input mode. Exactly one is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation keys.
    #[default]
    Normal,
    /// Typing a `:` command.
    Command,
    /// Typing a `/` filter.
    Filter,
    /// Typing a sudo password.
    Password,
}

/// Which package set the table shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Installed packages.
    #[default]
    Local,
    /// Remote search results.
    Remote,
}

/// Kind of mutating operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpKind {
    /// Install a package.
    Install,
    /// Remove a package.
    Remove,
}

/// A requested install or remove.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operation {
    /// Install or remove.
    pub kind: OpKind,
    /// Target package.
    pub package: String,
    /// Package comes from the AUR and goes through the helper.
    pub is_aur: bool,
}

/// Install/remove state machine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OpState {
    /// Nothing in progress.
    #[default]
    Idle,
    /// Waiting for Enter or Esc.
    PendingConfirm(Operation),
    /// Waiting for the sudo password.
    PasswordPrompt(Operation),
    /// Command is running.
    Running(Operation),
    /// Finished; output shown until acknowledged.
    Completed {
        /// The finished operation.
        op: Operation,
        /// Command output.
        output: String,
        /// Failure text, if it failed.
        error: Option<String>,
    },
}

impl OpState {
    /// Operation carried by the current state.
    #[must_use]
    pub const fn operation(&self) -> Option<&Operation> {
        match self {
            Self::Idle => None,
            Self::PendingConfirm(op)
            | Self::PasswordPrompt(op)
            | Self::Running(op)
            | Self::Completed { op, .. } => Some(op),
        }
    }

    /// An install or remove command is executing.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running(_))
    }
}

/// Severity of a status-bar notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// Informational.
    Info,
    /// Something went wrong.
    Error,
}

/// One-shot status-bar message cleared by the next key press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Message text.
    pub text: String,
    /// Severity.
    pub kind: NoticeKind,
}

/// Application state owned by the event loop.
///
/// Not `Debug`: it holds the password buffer.
pub struct AppState {
    /// Package table.
    pub viewport: Viewport,
    /// Active input mode.
    pub mode: InputMode,
    /// Text typed in Command or Filter mode, prefix included.
    pub buffer: String,
    /// Masked password input.
    pub password: Zeroizing<String>,
    /// Preset table.
    pub presets: Vec<Preset>,
    /// Index of the active preset.
    pub current_preset: usize,
    /// Detail panel is open.
    pub show_detail: bool,
    /// Local or remote view.
    pub view_mode: ViewMode,
    /// Query of the current remote view.
    pub remote_query: Option<String>,
    /// Why the remote view is empty.
    pub remote_error: Option<String>,
    /// Installed packages from the last load.
    pub local_packages: Vec<Package>,
    /// Remote search waiting for its sources.
    pub search: Option<SearchJoin>,
    /// Last issued search request id.
    pub last_search_id: u64,
    /// Initial load has not finished yet.
    pub loading: bool,
    /// Current spinner frame index.
    pub spinner_frame: usize,
    /// A spinner tick is scheduled.
    pub spinner_active: bool,
    /// Install/remove state machine.
    pub op: OpState,
    /// AUR lookups are enabled.
    pub aur_enabled: bool,
    /// Detected AUR helper.
    pub helper: Option<String>,
    /// Process runs as root.
    pub privileged: bool,
    /// Status-bar notice.
    pub notice: Option<Notice>,
    /// Unrecoverable start-up error.
    pub fatal_error: Option<String>,
    /// Active colors.
    pub theme: Theme,
    /// Config color overrides, re-applied on every theme switch.
    pub theme_overrides: ThemeColors,
    /// Commands are described instead of executed.
    pub dry_run: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            mode: InputMode::Normal,
            buffer: String::new(),
            password: Zeroizing::new(String::new()),
            presets: default_presets(),
            current_preset: 0,
            show_detail: false,
            view_mode: ViewMode::Local,
            remote_query: None,
            remote_error: None,
            local_packages: Vec::new(),
            search: None,
            last_search_id: 0,
            loading: true,
            spinner_frame: 0,
            spinner_active: false,
            op: OpState::Idle,
            aur_enabled: true,
            helper: None,
            privileged: false,
            notice: None,
            fatal_error: None,
            theme: Theme::default(),
            theme_overrides: ThemeColors::default(),
            dry_run: false,
        }
    }
}

impl AppState {
    /// Active preset.
    #[must_use]
    pub fn preset(&self) -> Option<&Preset> {
        self.presets.get(self.current_preset)
    }

    /// Remote search is waiting for results.
    #[must_use]
    pub const fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    /// Something the spinner animates is in progress.
    #[must_use]
    pub const fn needs_spinner(&self) -> bool {
        self.is_searching() || self.op.is_running()
    }

    /// Current spinner glyph.
    #[must_use]
    pub fn spinner(&self) -> char {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    /// Text typed after the mode prefix.
    #[must_use]
    pub fn buffer_content(&self) -> &str {
        self.buffer.get(1..).unwrap_or("")
    }

    /// Show an informational notice.
    pub fn info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            kind: NoticeKind::Info,
        });
    }

    /// Show an error notice.
    pub fn error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            kind: NoticeKind::Error,
        });
    }

    /// What: Switch the table columns between local and remote layouts.
    ///
    /// Details:
    /// - Remote results have no install date; an Installed column is shown instead.
    pub fn set_remote_columns(&mut self, remote: bool) {
        self.viewport.set_column_visible(ColumnKind::InstallDate, !remote);
        self.viewport.set_column_visible(ColumnKind::Installed, remote);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Fresh state starts loading in Normal mode with the first preset.
    fn defaults() {
        let app = AppState::default();
        assert!(app.loading);
        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.preset().map(|p| p.name), Some("Explicit"));
        assert!(!app.needs_spinner());
        assert_eq!(app.spinner(), '⠋');
    }

    #[test]
    /// What: Buffer content skips the mode prefix.
    fn buffer_content_skips_prefix() {
        let mut app = AppState::default();
        assert_eq!(app.buffer_content(), "");
        app.buffer = ":g 10".into();
        assert_eq!(app.buffer_content(), "g 10");
    }

    #[test]
    /// What: Operation accessor and running flag follow the state.
    fn op_state_accessors() {
        let op = Operation {
            kind: OpKind::Remove,
            package: "vim".into(),
            is_aur: false,
        };
        assert!(OpState::Idle.operation().is_none());
        assert!(OpState::Running(op.clone()).is_running());
        assert_eq!(
            OpState::PendingConfirm(op.clone()).operation().map(|o| o.package.as_str()),
            Some("vim")
        );
    }
}
