//! Package detail panel.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::logic::rows::{format_size, yes_no};
use crate::state::Package;
use crate::theme::Theme;

/// What: Label/value pairs shown for a package.
///
/// Inputs:
/// - `pkg`: Package to describe
///
/// Output:
/// - Fields in display order; empty values are left out except the
///   orphan/foreign flags, which are always shown
#[must_use]
pub fn detail_fields(pkg: &Package) -> Vec<(&'static str, String)> {
    let date = |d: Option<chrono::NaiveDateTime>| {
        d.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    };
    let latest = if pkg.has_update {
        pkg.new_version.clone()
    } else {
        String::new()
    };
    let size = if pkg.installed_size > 0 {
        format_size(pkg.installed_size)
    } else {
        String::new()
    };
    let candidates = [
        ("Name", pkg.name.clone()),
        ("Installed Version", pkg.version.clone()),
        ("Repository", pkg.repository.clone()),
        ("Architecture", pkg.architecture.clone()),
        ("Installed", yes_no(pkg.installed).to_string()),
        ("Install Date", date(pkg.install_date)),
        (
            "Install Reason",
            if pkg.installed {
                pkg.install_reason.to_string()
            } else {
                String::new()
            },
        ),
        ("Is Orphan", yes_no(pkg.is_orphan).to_string()),
        ("Is Foreign", yes_no(pkg.is_foreign).to_string()),
        ("Latest Version", latest),
        ("Description", pkg.description.clone()),
        ("URL", pkg.url.clone()),
        ("Packager", pkg.packager.clone()),
        ("Build Date", date(pkg.build_date)),
        ("Licenses", pkg.licenses.join(", ")),
        ("Size", size),
        ("Votes", pkg.votes.map(|v| v.to_string()).unwrap_or_default()),
        (
            "Popularity",
            pkg.popularity.map(|p| format!("{p:.2}")).unwrap_or_default(),
        ),
        ("Groups", pkg.groups.join(", ")),
        ("Dependencies", pkg.depends.join(", ")),
        ("Optional Dependencies", pkg.opt_depends.join(", ")),
        ("Required By", pkg.required_by.join(", ")),
        ("Provides", pkg.provides.join(", ")),
        ("Conflicts", pkg.conflicts.join(", ")),
        ("Replaces", pkg.replaces.join(", ")),
    ];
    candidates
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
}

/// Rows the panel needs for `field_count` fields in two columns plus borders.
#[must_use]
pub fn panel_height(field_count: usize) -> u16 {
    u16::try_from(field_count.div_ceil(2) + 2).unwrap_or(u16::MAX)
}

fn field_lines<'a>(fields: &'a [(&'static str, String)], th: &Theme) -> Vec<Line<'a>> {
    fields
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{label}: "),
                    Style::new().fg(th.accent1).add_modifier(Modifier::BOLD),
                ),
                Span::styled(value.as_str(), Style::new().fg(th.foreground)),
            ])
        })
        .collect()
}

/// What: Render the detail panel for `pkg` into `area`.
///
/// Details:
/// - Fields are split into a left and right column, left filled first.
pub fn render_detail(f: &mut Frame, pkg: &Package, th: &Theme, area: Rect) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", pkg.name),
            Style::new().fg(th.accent2).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(th.dimmed))
        .style(Style::new().bg(th.background));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let fields = detail_fields(pkg);
    let split = fields.len().div_ceil(2);
    let (left, right) = fields.split_at(split);
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);
    for (half, rect) in [left, right].into_iter().zip(halves.iter()) {
        let paragraph = Paragraph::new(field_lines(half, th)).wrap(Wrap { trim: true });
        f.render_widget(paragraph, *rect);
    }
}
