//! Pacman command execution utilities.

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Execute `pacman` with the provided arguments and capture stdout.
///
/// Inputs:
/// - `args`: Slice of CLI arguments passed directly to the pacman binary.
///
/// Output:
/// - Returns the command's stdout as a UTF-8 string.
///
/// # Errors
/// - Returns `Err` when `pacman` cannot be spawned, exits non-zero, or prints invalid UTF-8
///
/// Details:
/// - Runs with `LC_ALL=C` so field names and dates are stable for parsing.
pub fn run_pacman(args: &[&str]) -> Result<String> {
    let out = std::process::Command::new("pacman")
        .env("LC_ALL", "C")
        .args(args)
        .output()?;
    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        return Err(format!("pacman {} failed: {}", args.join(" "), stderr.trim()).into());
    }
    Ok(String::from_utf8(out.stdout)?)
}

/// What: Execute a pacman query that exits with status 1 when nothing matches.
///
/// Output:
/// - Stdout, or an empty string for the "no results" exit
///
/// # Errors
/// - Returns `Err` for spawn failures and other non-zero exits
pub fn run_pacman_allow_empty(args: &[&str]) -> Result<String> {
    let out = std::process::Command::new("pacman")
        .env("LC_ALL", "C")
        .args(args)
        .output()?;
    if out.status.success() {
        return Ok(String::from_utf8(out.stdout)?);
    }
    if out.status.code() == Some(1) && out.stderr.iter().all(u8::is_ascii_whitespace) {
        return Ok(String::new());
    }
    let stderr = String::from_utf8_lossy(&out.stderr);
    Err(format!("pacman {} failed: {}", args.join(" "), stderr.trim()).into())
}
