//! The boxed info panel shown to the right of the ASCII art.

use crate::age::uptime_string;
use crate::config::{Link, ProfileConfig};
use crate::stats::Stats;
use chrono::NaiveDate;

/// Visible characters between the box's inner margins.
pub const CONTENT_WIDTH: usize = 50;
/// Full panel width: content plus two spaces of margin on each side.
pub const BOX_WIDTH: usize = CONTENT_WIDTH + 4;

const MIN_DOTS: usize = 3;
const MARGIN: &str = "  ";

/// Abbreviate large counts: `42`, `1.5K`, `2.5M`.
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Right-hand side of a row.
enum Value<'a> {
    Text(&'a str),
    Link(&'a Link),
}

impl Value<'_> {
    /// What the reader sees, without markup.
    fn visible(&self) -> &str {
        match self {
            Value::Text(text) => text,
            Value::Link(link) => &link.label,
        }
    }

    fn render(&self) -> String {
        match self {
            Value::Text(text) => text.to_string(),
            Value::Link(link) => format!(r#"<a href="{}">{}</a>"#, link.url, link.label),
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// `label: ...... value`, dot-filled so the visible text spans the content
/// width (never fewer than three dots).
fn stat_row(label: &str, value: Value<'_>) -> String {
    let visible_len = char_len(label) + 3 + char_len(value.visible());
    let dots = ".".repeat(CONTENT_WIDTH.saturating_sub(visible_len).max(MIN_DOTS));
    format!("{MARGIN}{label}: {dots} {}{MARGIN}", value.render())
}

fn section_header(title: &str) -> String {
    let prefix = format!("── {title} ");
    let dashes = "─".repeat(CONTENT_WIDTH.saturating_sub(char_len(&prefix)));
    format!("{MARGIN}{prefix}{dashes}{MARGIN}")
}

fn empty_line() -> String {
    " ".repeat(BOX_WIDTH)
}

fn top_border() -> String {
    format!("┏{}┓", "━".repeat(BOX_WIDTH - 2))
}

fn bottom_border() -> String {
    format!("┗{}┛", "━".repeat(BOX_WIDTH - 2))
}

/// Text rows for whichever of `(label, value)` are set.
fn text_rows(rows: &[(&str, Option<&String>)]) -> Vec<String> {
    rows.iter()
        .filter_map(|(label, value)| value.map(|v| stat_row(label, Value::Text(v))))
        .collect()
}

/// Append `rows` under a section header, followed by a blank line.
/// Sections without rows are left out entirely.
fn push_section(lines: &mut Vec<String>, title: &str, rows: Vec<String>) {
    if rows.is_empty() {
        return;
    }
    lines.push(section_header(title));
    lines.extend(rows);
    lines.push(empty_line());
}

/// Build the panel lines, header line first and bottom border last.
///
/// `today` only feeds the uptime row, so the output is fully determined by
/// the arguments.
pub fn build_info_lines(config: &ProfileConfig, stats: &Stats, today: NaiveDate) -> Vec<String> {
    let mut lines = vec![
        format!("$ {}", config.header),
        top_border(),
        empty_line(),
    ];

    let uptime = config.birthday.map(|b| uptime_string(b, today));
    lines.extend(text_rows(&[
        ("Host", config.host.as_ref()),
        ("Kernel", config.kernel.as_ref()),
        ("Uptime", uptime.as_ref()),
        ("Location", config.location.as_ref()),
    ]));
    lines.push(empty_line());

    let languages = &config.languages;
    push_section(
        &mut lines,
        "Languages",
        text_rows(&[
            ("Languages.Code", languages.code.as_ref()),
            ("Languages.Markup", languages.markup.as_ref()),
            ("Languages.Human", languages.human.as_ref()),
        ]),
    );

    let stack = &config.stack;
    push_section(
        &mut lines,
        "Stack",
        text_rows(&[
            ("Backend", stack.backend.as_ref()),
            ("Frontend", stack.frontend.as_ref()),
            ("Database", stack.database.as_ref()),
            ("Infra", stack.infra.as_ref()),
        ]),
    );

    let contact = &config.contact;
    let contact_rows = [
        ("Website", contact.website.as_ref()),
        ("Email", contact.email.as_ref()),
        ("LinkedIn", contact.linkedin.as_ref()),
    ]
    .into_iter()
    .filter_map(|(label, link)| {
        link.filter(|l| l.is_complete())
            .map(|l| stat_row(label, Value::Link(l)))
    })
    .collect();
    push_section(&mut lines, "Contact", contact_rows);

    let loc = format!(
        "{} {{ {}++, {}-- }}",
        format_number(stats.loc_total()),
        format_number(stats.additions),
        format_number(stats.deletions)
    );
    lines.push(section_header("GitHub Stats"));
    lines.extend([
        stat_row("Repos", Value::Text(&stats.repos.to_string())),
        stat_row("Commits", Value::Text(&format_number(stats.commits))),
        stat_row("PRs", Value::Text(&format_number(stats.prs))),
        stat_row("Stars", Value::Text(&format_number(stats.stars))),
        stat_row("Followers", Value::Text(&stats.followers.to_string())),
        stat_row("Lines of Code", Value::Text(&loc)),
    ]);

    lines.push(empty_line());
    lines.push(bottom_border());
    lines
}
