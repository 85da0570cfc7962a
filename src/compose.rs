/// Spaces between the art column and the info panel.
pub const COLUMN_GAP: usize = 6;

/// Place `art` to the left of `info`, one output line per row.
///
/// The art is framed by `=` border lines. When the panel is taller, the art
/// is also centred vertically with `@` fill lines so both columns end on the
/// same row; when the art is taller, the panel simply runs out early.
pub fn merge_ascii_and_info(art: &[String], info: &[String]) -> Vec<String> {
    let art_width = art.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let border = "=".repeat(art_width);
    let fill = "@".repeat(art_width);

    let mut column: Vec<&str> = Vec::with_capacity(art.len().max(info.len()) + 2);
    column.push(&border);

    // Two rows of the panel's height go to the borders.
    let available = info.len().saturating_sub(2);
    if info.len() > art.len() && available > art.len() {
        let top = (available - art.len()) / 2;
        let bottom = available - art.len() - top;
        column.extend(std::iter::repeat_n(fill.as_str(), top));
        column.extend(art.iter().map(String::as_str));
        column.extend(std::iter::repeat_n(fill.as_str(), bottom));
    } else {
        column.extend(art.iter().map(String::as_str));
    }
    column.push(&border);

    let gap = " ".repeat(COLUMN_GAP);
    let height = column.len().max(info.len());

    (0..height)
        .map(|i| {
            let left = column.get(i).copied().unwrap_or("");
            let right = info.get(i).map(String::as_str).unwrap_or("");
            format!("{left:<art_width$}{gap}{right}")
        })
        .collect()
}
