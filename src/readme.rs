use anyhow::{Context, Result};
use std::path::Path;

/// Read the art file, dropping trailing whitespace from every line.
pub fn load_ascii_art(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ASCII art {}", path.display()))?;
    Ok(content.lines().map(|l| l.trim_end().to_string()).collect())
}

/// Profile-views counter shown under the panel.
pub fn views_badge(username: &str) -> String {
    format!(
        r#"<p align="center"> <img src="https://komarev.com/ghpvc/?username={username}&label=👀" alt="{username}" /> </p>"#
    )
}

/// Wrap the merged lines in a `<pre>` block and append the badge.
pub fn render_readme(username: &str, merged: &[String]) -> String {
    let mut out = String::from("<pre>\n");
    out.push_str(&merged.join("\n"));
    out.push_str("\n</pre>\n");
    out.push_str("\n---\n\n");
    out.push_str(&views_badge(username));
    out.push('\n');
    out
}
