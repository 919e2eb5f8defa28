use std::io::Write;
use std::process::{Command, Stdio};

use zeroize::Zeroizing;

use crate::sources::Result;
use crate::util::shell_single_quote;

/// Number of trailing output lines kept in failure messages.
const ERROR_TAIL_LINES: usize = 5;

/// What: Render an argv as a copy-pasteable shell command.
///
/// Inputs:
/// - `argv`: Program and arguments
/// - `sudo`: Prefix the line with `sudo`
#[must_use]
pub fn describe_command(argv: &[String], sudo: bool) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(argv.len() + 1);
    if sudo {
        parts.push("sudo".into());
    }
    for arg in argv {
        if arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./+=:@".contains(c))
            && !arg.is_empty()
        {
            parts.push(arg.clone());
        } else {
            parts.push(shell_single_quote(arg));
        }
    }
    parts.join(" ")
}

/// What: Collapse a process's stdout and stderr into one clean string.
fn collect_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(&strip_ansi_escapes::strip(stdout)).into_owned();
    let err = String::from_utf8_lossy(&strip_ansi_escapes::strip(stderr)).into_owned();
    if !err.trim().is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&err);
    }
    text.trim_end().to_string()
}

/// Last few lines of `output` for error messages.
fn output_tail(output: &str) -> String {
    let lines: Vec<&str> = output.lines().collect();
    let start = lines.len().saturating_sub(ERROR_TAIL_LINES);
    lines[start..].join("\n")
}

/// What: Run a command, through `sudo -S` when a credential is supplied.
///
/// Inputs:
/// - `argv`: Program and arguments (for example `pacman -S --noconfirm foo`)
/// - `credential`: sudo password; `None` runs `argv` directly (privileged process)
/// - `dry_run`: Return the command line instead of running it
///
/// Output:
/// - Combined stdout and stderr with ANSI escapes stripped
///
/// # Errors
/// - Returns `Err` when the process cannot be spawned or exits unsuccessfully;
///   the message carries the exit status and the last lines of output
///
/// Details:
/// - The credential is written to sudo's stdin followed by a newline and never
///   appears on a command line.
pub fn run_privileged(argv: &[String], credential: Option<&str>, dry_run: bool) -> Result<String> {
    let Some((program, args)) = argv.split_first() else {
        return Err("empty command".into());
    };
    let use_sudo = credential.is_some();
    if dry_run {
        let line = describe_command(argv, use_sudo);
        tracing::info!(command = %line, "dry run");
        return Ok(format!("DRY RUN: {line}"));
    }

    let mut cmd = if use_sudo {
        let mut c = Command::new("sudo");
        c.args(["-S", "-p", ""]).arg(program).args(args);
        c
    } else {
        let mut c = Command::new(program);
        c.args(args);
        c
    };
    cmd.env("LC_ALL", "C")
        .stdin(if use_sudo { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    tracing::info!(command = %describe_command(argv, use_sudo), "running command");
    let mut child = cmd.spawn()?;
    if let (Some(pass), Some(mut stdin)) = (credential, child.stdin.take()) {
        let line = Zeroizing::new(format!("{pass}\n"));
        stdin.write_all(line.as_bytes())?;
    }
    let out = child.wait_with_output()?;
    let text = collect_output(&out.stdout, &out.stderr);
    if out.status.success() {
        tracing::info!(program = %program, "command finished");
        Ok(text)
    } else {
        let code = out
            .status
            .code()
            .map_or_else(|| "signal".to_string(), |c| c.to_string());
        tracing::warn!(program = %program, status = %code, "command failed");
        let tail = output_tail(&text);
        if tail.is_empty() {
            Err(format!("{program} failed (exit {code})").into())
        } else {
            Err(format!("{program} failed (exit {code}): {tail}").into())
        }
    }
}
