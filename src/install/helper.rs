//! AUR helper detection and interactive invocation.

use std::process::Command;

/// Helpers probed in order when none is configured.
pub const HELPER_CANDIDATES: [&str; 4] = ["yay", "paru", "pikaur", "trizen"];

/// Completion error when no helper is available.
pub const NO_HELPER_ERROR: &str = "no AUR helper found (install yay, paru, pikaur, or trizen)";

/// What: Pick the AUR helper binary.
///
/// Inputs:
/// - `preferred`: Configured helper; blank means auto-detect
/// - `on_path`: Predicate reporting whether a program is on `PATH`
///
/// Output:
/// - The configured helper when it is on `PATH`, else the first candidate found
pub fn detect_helper_with(preferred: Option<&str>, on_path: impl Fn(&str) -> bool) -> Option<String> {
    if let Some(name) = preferred.map(str::trim).filter(|s| !s.is_empty()) {
        if on_path(name) {
            return Some(name.to_string());
        }
        tracing::warn!(helper = %name, "configured AUR helper not found, auto-detecting");
    }
    HELPER_CANDIDATES
        .iter()
        .find(|c| on_path(c))
        .map(|c| (*c).to_string())
}

/// Detect the AUR helper using `which`.
#[must_use]
pub fn detect_helper(preferred: Option<&str>) -> Option<String> {
    let helper = detect_helper_with(preferred, |p| which::which(p).is_ok());
    tracing::debug!(helper = ?helper, "AUR helper detection");
    helper
}

/// Argument vector for installing `name` through `helper`.
#[must_use]
pub fn helper_argv(helper: &str, name: &str) -> Vec<String> {
    vec![helper.to_string(), "-S".to_string(), name.to_string()]
}

/// What: Run the helper interactively with the terminal's own stdio.
///
/// Inputs:
/// - `helper`: Helper binary
/// - `name`: Package to install
/// - `dry_run`: Only print the command
///
/// Output:
/// - `Ok(true)` when the helper exited successfully
///
/// # Errors
/// - Returns `Err` when the helper cannot be spawned
///
/// Details:
/// - Blocks until the helper exits; the caller must hand over the terminal first.
pub fn run_helper(helper: &str, name: &str, dry_run: bool) -> Result<bool, String> {
    let argv = helper_argv(helper, name);
    let line = super::describe_command(&argv, false);
    if dry_run {
        println!("DRY RUN: {line}");
        return Ok(true);
    }
    tracing::info!(command = %line, "running AUR helper");
    let status = Command::new(helper)
        .args(&argv[1..])
        .status()
        .map_err(|e| format!("failed to run {helper}: {e}"))?;
    tracing::info!(helper = %helper, success = status.success(), "AUR helper exited");
    Ok(status.success())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Configured helper wins when present, otherwise candidates are probed in order.
    fn detection_order() {
        let present = |p: &str| matches!(p, "paru" | "trizen" | "aura");
        assert_eq!(detect_helper_with(Some("aura"), present).as_deref(), Some("aura"));
        assert_eq!(detect_helper_with(Some("yay"), present).as_deref(), Some("paru"));
        assert_eq!(detect_helper_with(Some("  "), present).as_deref(), Some("paru"));
        assert_eq!(detect_helper_with(None, |_| false), None);
    }

    #[test]
    /// What: Helper invocation is `<helper> -S <name>`.
    fn argv_shape() {
        assert_eq!(helper_argv("yay", "foo"), vec!["yay", "-S", "foo"]);
    }
}
