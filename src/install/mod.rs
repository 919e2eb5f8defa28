//! Privileged command execution and AUR helper integration.

pub mod command;
pub mod helper;

pub use command::{describe_command, run_privileged};
pub use helper::{HELPER_CANDIDATES, NO_HELPER_ERROR, detect_helper, helper_argv, run_helper};

/// What: Report whether the process runs with an effective uid of 0.
///
/// Output:
/// - `true` when no password prompt is needed for pacman
#[cfg(unix)]
#[must_use]
pub fn is_privileged() -> bool {
    nix::unistd::geteuid().is_root()
}

/// Non-unix targets always prompt.
#[cfg(not(unix))]
#[must_use]
pub const fn is_privileged() -> bool {
    false
}
