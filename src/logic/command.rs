//! Command-line interpreter for `:` commands and the command palette catalogue.

use crate::logic::presets::{PresetKind, preset_names};

/// Intent parsed from a command line.
///
/// Parse failures are ordinary values ([`Command::Error`]) carrying the text
/// shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Nothing was typed.
    Noop,
    /// Exit the application.
    Quit,
    /// Jump to a 0-based line.
    GotoLine(usize),
    /// Jump to the first row.
    ScrollTop,
    /// Jump to the last row.
    ScrollEnd,
    /// Switch preset.
    Preset(PresetKind),
    /// Enter remote search with a query.
    Search(String),
    /// Install the selected package.
    Install,
    /// Remove the selected package.
    Remove,
    /// Load a theme by name.
    Theme(String),
    /// Parse failure with a usage hint.
    Error(String),
}

/// What: Parse a command line.
///
/// Inputs:
/// - `input`: Text typed after the `:` prefix
///
/// Output:
/// - The parsed intent; unknown commands and missing arguments yield
///   [`Command::Error`]
///
/// Details:
/// - Line numbers are 1-based on input and converted to 0-based.
/// - `g10` parses the same as `g 10`.
#[must_use]
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    if input.is_empty() {
        return Command::Noop;
    }
    if let Some(rest) = input.strip_prefix('g')
        && rest.starts_with(|c: char| c.is_ascii_digit())
    {
        return parse_goto(&[rest]);
    }

    let mut parts = input.split_whitespace();
    let Some(head) = parts.next() else {
        return Command::Noop;
    };
    let args: Vec<&str> = parts.collect();

    match head {
        "g" | "goto" => parse_goto(&args),
        "t" | "top" => Command::ScrollTop,
        "e" | "end" => Command::ScrollEnd,
        "q" | "quit" => Command::Quit,
        "p" | "preset" => parse_preset(&args),
        "s" | "search" => {
            if args.is_empty() {
                Command::Error("Usage: :search <query>".into())
            } else {
                Command::Search(args.join(" "))
            }
        }
        "i" | "install" => Command::Install,
        "r" | "remove" => Command::Remove,
        "theme" | "th" => args.first().map_or_else(
            || Command::Error("Usage: :theme <name>".into()),
            |name| Command::Theme((*name).to_string()),
        ),
        other => Command::Error(format!("Unknown command: {other}")),
    }
}

/// Parse the argument of a goto command.
fn parse_goto(args: &[&str]) -> Command {
    let Some(raw) = args.first() else {
        return Command::Error("Usage: :g <line>".into());
    };
    match raw.parse::<i64>() {
        Ok(line) => Command::GotoLine(usize::try_from(line.saturating_sub(1)).unwrap_or(0)),
        Err(_) => Command::Error(format!("Invalid line number: {raw}")),
    }
}

/// Parse the argument of a preset command.
fn parse_preset(args: &[&str]) -> Command {
    let Some(raw) = args.first() else {
        return Command::Error(format!("Usage: :p <preset> ({})", preset_names()));
    };
    PresetKind::from_key(raw).map_or_else(
        || Command::Error(format!("Invalid preset: {raw} (valid: {})", preset_names())),
        Command::Preset,
    )
}

/// Palette entry describing one command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandDef {
    /// Short name.
    pub name: &'static str,
    /// Long aliases.
    pub aliases: &'static [&'static str],
    /// Argument synopsis.
    pub args: &'static str,
    /// One-line help.
    pub description: &'static str,
}

/// What: Commands available in the current view.
///
/// Inputs:
/// - `remote`: Remote search view is active
///
/// Output:
/// - Shared commands plus install (remote) or remove (local)
#[must_use]
pub fn available_commands(remote: bool) -> Vec<CommandDef> {
    let mut commands = vec![
        CommandDef {
            name: "g",
            aliases: &["goto"],
            args: "<line>",
            description: "Go to line number",
        },
        CommandDef {
            name: "t",
            aliases: &["top"],
            args: "",
            description: "Jump to top (first row)",
        },
        CommandDef {
            name: "e",
            aliases: &["end"],
            args: "",
            description: "Jump to end (last row)",
        },
        CommandDef {
            name: "q",
            aliases: &["quit"],
            args: "",
            description: "Quit application",
        },
        CommandDef {
            name: "p",
            aliases: &["preset"],
            args: "<name>",
            description: "Switch to preset view",
        },
        CommandDef {
            name: "s",
            aliases: &["search"],
            args: "<query>",
            description: "Search repositories and the AUR",
        },
        CommandDef {
            name: "theme",
            aliases: &["th"],
            args: "<name>",
            description: "Switch color theme",
        },
    ];
    commands.push(if remote {
        CommandDef {
            name: "i",
            aliases: &["install"],
            args: "",
            description: "Install selected package",
        }
    } else {
        CommandDef {
            name: "r",
            aliases: &["remove"],
            args: "",
            description: "Remove selected package",
        }
    });
    commands
}

/// What: Narrow the catalogue by the typed prefix.
///
/// Inputs:
/// - `typed`: Buffer content without the `:` prefix
/// - `commands`: Catalogue to filter
///
/// Output:
/// - Commands whose name or an alias starts with the first typed word
#[must_use]
pub fn filter_commands(typed: &str, commands: Vec<CommandDef>) -> Vec<CommandDef> {
    let word = typed.split_whitespace().next().unwrap_or("").to_lowercase();
    if word.is_empty() {
        return commands;
    }
    commands
        .into_iter()
        .filter(|c| c.name.starts_with(&word) || c.aliases.iter().any(|a| a.starts_with(&word)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Goto accepts spaced and compact forms and converts to 0-based.
    fn goto_forms() {
        assert_eq!(parse_command("g 10"), Command::GotoLine(9));
        assert_eq!(parse_command("g10"), Command::GotoLine(9));
        assert_eq!(parse_command("goto 1"), Command::GotoLine(0));
        assert_eq!(parse_command("  g 0 "), Command::GotoLine(0));
        assert_eq!(parse_command("g -5"), Command::GotoLine(0));
        assert_eq!(
            parse_command("g -9223372036854775808"),
            Command::GotoLine(0)
        );
        assert_eq!(parse_command("g"), Command::Error("Usage: :g <line>".into()));
        assert_eq!(
            parse_command("g abc"),
            Command::Error("Invalid line number: abc".into())
        );
    }

    #[test]
    /// What: Simple commands and their aliases.
    fn simple_commands() {
        assert_eq!(parse_command(""), Command::Noop);
        assert_eq!(parse_command("t"), Command::ScrollTop);
        assert_eq!(parse_command("top"), Command::ScrollTop);
        assert_eq!(parse_command("e"), Command::ScrollEnd);
        assert_eq!(parse_command("end"), Command::ScrollEnd);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("quit"), Command::Quit);
        assert_eq!(parse_command("i"), Command::Install);
        assert_eq!(parse_command("remove"), Command::Remove);
        assert_eq!(parse_command("th nord"), Command::Theme("nord".into()));
        assert_eq!(
            parse_command("theme"),
            Command::Error("Usage: :theme <name>".into())
        );
        assert_eq!(
            parse_command("frobnicate x"),
            Command::Error("Unknown command: frobnicate".into())
        );
    }

    #[test]
    /// What: Presets are validated against the known names.
    fn preset_commands() {
        assert_eq!(
            parse_command("p orphans"),
            Command::Preset(PresetKind::Orphans)
        );
        assert_eq!(parse_command("preset aur"), Command::Preset(PresetKind::Aur));
        assert_eq!(
            parse_command("p"),
            Command::Error(
                "Usage: :p <preset> (explicit, dependency, orphans, foreign, aur, updatable, all)"
                    .into()
            )
        );
        assert_eq!(
            parse_command("p nope"),
            Command::Error(
                "Invalid preset: nope (valid: explicit, dependency, orphans, foreign, aur, updatable, all)"
                    .into()
            )
        );
    }

    #[test]
    /// What: Search joins every remaining word into the query.
    fn search_joins_words() {
        assert_eq!(
            parse_command("s  neovim   qt "),
            Command::Search("neovim qt".into())
        );
        assert_eq!(
            parse_command("search"),
            Command::Error("Usage: :search <query>".into())
        );
    }

    #[test]
    /// What: The palette narrows by prefix and swaps install/remove by view.
    fn palette_filtering() {
        let local = available_commands(false);
        assert!(local.iter().any(|c| c.name == "r"));
        assert!(!local.iter().any(|c| c.name == "i"));
        let remote = available_commands(true);
        assert!(remote.iter().any(|c| c.name == "i"));

        let narrowed = filter_commands("th", available_commands(false));
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].name, "theme");
        let searchy = filter_commands("se", available_commands(false));
        assert_eq!(searchy[0].name, "s");
        assert_eq!(filter_commands("", available_commands(true)).len(), 8);
    }
}
