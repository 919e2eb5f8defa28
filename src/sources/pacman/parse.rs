//! Parsers for pacman's human-readable output (`LC_ALL=C`).

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDateTime;

use crate::state::types::{InstallReason, Package};

/// What: Split `pacman -Qi` output into per-package field maps.
///
/// Inputs:
/// - `text`: Raw stdout
///
/// Output:
/// - One map per package; each key holds its first-line value followed by
///   any continuation lines
///
/// Details:
/// - Records are separated by blank lines; continuation lines start with a space.
#[must_use]
pub fn split_records(text: &str) -> Vec<BTreeMap<String, Vec<String>>> {
    let mut records = Vec::new();
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut last_key: Option<String> = None;
    for line in text.lines() {
        if line.trim().is_empty() {
            if !map.is_empty() {
                records.push(std::mem::take(&mut map));
            }
            last_key = None;
            continue;
        }
        if !line.starts_with(' ')
            && let Some((k, v)) = line.split_once(" : ")
        {
            let key = k.trim().to_string();
            map.insert(key.clone(), vec![v.trim().to_string()]);
            last_key = Some(key);
        } else if let Some(k) = &last_key {
            map.entry(k.clone())
                .or_default()
                .push(line.trim().to_string());
        }
    }
    if !map.is_empty() {
        records.push(map);
    }
    records
}

/// Whitespace-separated list field; `None` means empty.
fn list(map: &BTreeMap<String, Vec<String>>, key: &str) -> Vec<String> {
    map.get(key)
        .map(|lines| {
            lines
                .iter()
                .flat_map(|l| l.split_whitespace())
                .filter(|w| *w != "None")
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Single-line field.
fn field(map: &BTreeMap<String, Vec<String>>, key: &str) -> String {
    map.get(key)
        .and_then(|lines| lines.first())
        .filter(|v| v.as_str() != "None")
        .cloned()
        .unwrap_or_default()
}

/// What: Parse a pacman size such as `3.44 MiB`.
///
/// Output:
/// - Size in bytes, `None` when the number is unreadable
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn parse_size_bytes(s: &str) -> Option<u64> {
    let mut it = s.split_whitespace();
    let num = it.next()?.parse::<f64>().ok()?;
    let mult = match it.next().unwrap_or("B") {
        "KiB" => 1024.0,
        "MiB" => 1024.0 * 1024.0,
        "GiB" => 1024.0 * 1024.0 * 1024.0,
        "TiB" => 1024.0 * 1024.0 * 1024.0 * 1024.0,
        _ => 1.0,
    };
    Some((num * mult).max(0.0) as u64)
}

/// What: Parse a pacman date in the C locale (`Tue Jan  2 10:11:12 2024`).
#[must_use]
pub fn parse_pacman_date(s: &str) -> Option<NaiveDateTime> {
    let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDateTime::parse_from_str(&normalized, "%a %b %d %H:%M:%S %Y").ok()
}

/// What: Convert one `-Qi` record into an installed package.
///
/// Output:
/// - `None` when the record has no name
#[must_use]
pub fn record_to_package(map: &BTreeMap<String, Vec<String>>) -> Option<Package> {
    let name = field(map, "Name");
    if name.is_empty() {
        return None;
    }
    let install_reason = match field(map, "Install Reason") {
        r if r.starts_with("Explicitly") => InstallReason::Explicit,
        r if r.contains("dependency") => InstallReason::Dependency,
        _ => InstallReason::Unknown,
    };
    let opt_depends = map
        .get("Optional Deps")
        .map(|lines| {
            lines
                .iter()
                .filter(|l| l.as_str() != "None")
                .map(|l| {
                    l.split(": ")
                        .next()
                        .unwrap_or(l)
                        .trim_end_matches(" [installed]")
                        .trim()
                        .to_string()
                })
                .filter(|n| !n.is_empty())
                .collect()
        })
        .unwrap_or_default();
    Some(Package {
        name,
        version: field(map, "Version"),
        description: field(map, "Description"),
        architecture: field(map, "Architecture"),
        url: field(map, "URL"),
        licenses: list(map, "Licenses"),
        groups: list(map, "Groups"),
        depends: list(map, "Depends On"),
        opt_depends,
        conflicts: list(map, "Conflicts With"),
        provides: list(map, "Provides"),
        replaces: list(map, "Replaces"),
        required_by: list(map, "Required By"),
        installed: true,
        install_date: parse_pacman_date(&field(map, "Install Date")),
        install_reason,
        installed_size: parse_size_bytes(&field(map, "Installed Size")).unwrap_or(0),
        packager: field(map, "Packager"),
        build_date: parse_pacman_date(&field(map, "Build Date")),
        ..Package::default()
    })
}

/// Parse every record of `pacman -Qi`.
#[must_use]
pub fn parse_query_info(text: &str) -> Vec<Package> {
    split_records(text)
        .iter()
        .filter_map(record_to_package)
        .collect()
}

/// One name per line (`-Qq`, `-Qdtq`, `-Qmq`).
#[must_use]
pub fn parse_name_list(text: &str) -> HashSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// What: Parse `pacman -Qu` lines (`name old -> new`).
///
/// Output:
/// - New version by package name
#[must_use]
pub fn parse_updates(text: &str) -> HashMap<String, String> {
    text.lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let name = parts.next()?;
            let new = parts.skip_while(|p| *p != "->").nth(1)?;
            Some((name.to_string(), new.to_string()))
        })
        .collect()
}

/// What: Parse `pacman -Sl` lines (`repo name version [installed]`).
///
/// Output:
/// - Repository by package name; the first repository listed wins
#[must_use]
pub fn parse_sync_list(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in text.lines() {
        let mut parts = line.split_whitespace();
        if let (Some(repo), Some(name)) = (parts.next(), parts.next()) {
            map.entry(name.to_string())
                .or_insert_with(|| repo.to_string());
        }
    }
    map
}

/// What: Parse `pacman -Ss` output.
///
/// Inputs:
/// - `text`: Raw stdout; headers look like
///   `extra/vim 9.1-1 (group) [installed]` followed by an indented description
///
/// Output:
/// - Packages in listing order
#[must_use]
pub fn parse_sync_search(text: &str) -> Vec<Package> {
    let mut out: Vec<Package> = Vec::new();
    for line in text.lines() {
        if line.starts_with(char::is_whitespace) {
            if let Some(last) = out.last_mut()
                && last.description.is_empty()
            {
                last.description = line.trim().to_string();
            }
            continue;
        }
        let mut parts = line.split_whitespace();
        let Some((repo, name)) = parts.next().and_then(|s| s.split_once('/')) else {
            continue;
        };
        let version = parts.next().unwrap_or_default().to_string();
        let rest: Vec<&str> = parts.collect();
        let rest = rest.join(" ");
        let installed = rest.contains("[installed");
        let groups = rest
            .split_once('(')
            .and_then(|(_, g)| g.split_once(')'))
            .map(|(g, _)| g.split_whitespace().map(ToString::to_string).collect())
            .unwrap_or_default();
        out.push(Package {
            name: name.to_string(),
            version,
            repository: repo.to_string(),
            installed,
            groups,
            ..Package::default()
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const QI: &str = "\
Name            : bash
Version         : 5.2.026-2
Description     : The GNU Bourne Again shell
Architecture    : x86_64
URL             : https://www.gnu.org/software/bash/bash.html
Licenses        : GPL-3.0-or-later
Groups          : None
Provides        : sh
Depends On      : readline  libreadline.so=8-64  glibc  ncurses
Optional Deps   : bash-completion: for tab completion
                  vim [installed]
Required By     : base  bzip2
Optional For    : None
Conflicts With  : None
Replaces        : None
Installed Size  : 9.36 MiB
Packager        : Tobias Powalowski <tpowa@archlinux.org>
Build Date      : Mon Jan 15 10:11:12 2024
Install Date    : Tue Feb  6 08:09:10 2024
Install Reason  : Installed as a dependency for another package
Install Script  : No
Validated By    : Signature

Name            : yay
Version         : 12.3.5-1
Description     : Yet another yogurt
Architecture    : x86_64
URL             : https://github.com/Jguer/yay
Licenses        : GPL-3.0-or-later
Groups          : None
Provides        : None
Depends On      : pacman>6.1  git
Optional Deps   : None
Required By     : None
Installed Size  : 8.00 MiB
Install Reason  : Explicitly installed
";

    #[test]
    /// What: `-Qi` records parse into installed packages with lists and dates.
    fn parses_query_info() {
        let pkgs = parse_query_info(QI);
        assert_eq!(pkgs.len(), 2);
        let bash = &pkgs[0];
        assert_eq!(bash.name, "bash");
        assert_eq!(bash.depends.len(), 4);
        assert_eq!(bash.opt_depends, ["bash-completion", "vim"]);
        assert!(bash.groups.is_empty());
        assert_eq!(bash.required_by, ["base", "bzip2"]);
        assert_eq!(bash.install_reason, InstallReason::Dependency);
        assert_eq!(bash.installed_size, (9.36 * 1024.0 * 1024.0) as u64);
        assert_eq!(
            bash.install_date.map(|d| d.format("%Y-%m-%d").to_string()),
            Some("2024-02-06".to_string())
        );
        assert!(bash.installed);
        let yay = &pkgs[1];
        assert_eq!(yay.install_reason, InstallReason::Explicit);
        assert!(yay.provides.is_empty());
        assert!(yay.install_date.is_none());
    }

    #[test]
    /// What: Update, sync-list, and name-list parsers.
    fn parses_auxiliary_listings() {
        let updates = parse_updates("bash 5.2.026-1 -> 5.2.026-2\nvim 9.0 -> 9.1 [ignored]\n");
        assert_eq!(updates.get("bash").map(String::as_str), Some("5.2.026-2"));
        assert_eq!(updates.get("vim").map(String::as_str), Some("9.1"));

        let repos = parse_sync_list("core bash 5.2 [installed]\nextra vim 9.1\ntesting bash 5.3\n");
        assert_eq!(repos.get("bash").map(String::as_str), Some("core"));
        assert_eq!(repos.len(), 2);

        let names = parse_name_list("a\n\n b \n");
        assert_eq!(names.len(), 2);
        assert!(names.contains("b"));
    }

    #[test]
    /// What: `-Ss` output yields repo, version, groups, installed flag, and description.
    fn parses_sync_search() {
        let text = "\
extra/vim 9.1.0-1 (editors) [installed]
    Vi Improved, a highly configurable text editor
extra/gvim 9.1.0-1
    Vi Improved, GUI
";
        let pkgs = parse_sync_search(text);
        assert_eq!(pkgs.len(), 2);
        assert_eq!(pkgs[0].repository, "extra");
        assert_eq!(pkgs[0].groups, ["editors"]);
        assert!(pkgs[0].installed);
        assert!(!pkgs[1].installed);
        assert_eq!(pkgs[1].description, "Vi Improved, GUI");
    }
}
