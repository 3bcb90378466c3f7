//! Unit details: the list of serviced equipment.
//!
//! Tables are preferred over the free-text listing because free-text unit
//! listings are noisier.

use regex::Match;
use tracing::debug;

use super::patterns::{
    TOTAL_WORD, UNIT_DETAILS_END, UNIT_DETAILS_LABEL, UNIT_HEADER_KEYWORDS, UNIT_NOISE,
};
use crate::document::Table;

/// Unit rows from the first table whose header names a unit column.
///
/// Returns `None` when no table qualifies. A qualifying table whose rows are
/// all filtered out yields `Some("")`; the free-text listing is then not
/// consulted.
pub fn units_from_tables(tables: &[Table]) -> Option<String> {
    let (index, table) = tables
        .iter()
        .enumerate()
        .find(|(_, table)| table.len() > 1 && is_unit_header(&table[0]))?;

    debug!("Using table {} ({} rows) for unit details", index, table.len());

    let lines: Vec<String> = table[1..]
        .iter()
        .map(|row| {
            row.iter()
                .filter(|cell| !cell.trim().is_empty())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .filter(|line| !line.is_empty() && !TOTAL_WORD.is_match(line))
        .collect();

    Some(lines.join("\n").trim().to_string())
}

fn is_unit_header(header: &[String]) -> bool {
    header
        .iter()
        .map(|cell| cell.to_lowercase())
        .any(|cell| UNIT_HEADER_KEYWORDS.contains(&cell.as_str()))
}

/// Unit lines between the `UNIT DETAILS` label and the next section label.
pub fn units_from_text(text: &str) -> Option<String> {
    let span = UNIT_DETAILS_LABEL
        .find_iter(text)
        .find_map(|label| unit_span(text, label))?;

    let lines: Vec<&str> = span
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !UNIT_NOISE.is_match(line))
        .collect();

    Some(lines.join("\n"))
}

/// The listing runs for at least one character, then up to the next section
/// label or the end of the text.
///
/// A label that reaches the end of the text gives back its trailing `:` or
/// whitespace character as the listing.
fn unit_span<'t>(text: &'t str, label: Match<'t>) -> Option<&'t str> {
    let mut start = label.end();
    if start == text.len() {
        let last = label.as_str().chars().next_back()?;
        if last != ':' && !last.is_whitespace() {
            return None;
        }
        start -= last.len_utf8();
    }

    let first = text[start..].chars().next()?;
    let end = UNIT_DETAILS_END
        .find_at(text, start + first.len_utf8())
        .map(|m| m.start())
        .unwrap_or(text.len());
    Some(&text[start..end])
}

/// Unit details, table listing first then free text.
pub fn extract_unit_details(text: &str, tables: &[Table]) -> String {
    units_from_tables(tables)
        .or_else(|| units_from_text(text))
        .unwrap_or_default()
}
