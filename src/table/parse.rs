// src/table/parse.rs
use super::{Row, Table};

/// Split CSV text into a [`Table`].
///
/// Lines are split on bare commas; quoted commas and doubled quotes are not
/// understood, so a comma inside a cell produces an extra column. Input that
/// is empty after trimming yields zero rows. A leading byte-order mark is
/// dropped.
pub fn parse(text: &str) -> Table {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text).trim();
    if text.is_empty() {
        return Table::default();
    }

    let rows = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .map(|line| Row::new(line.split(',').map(clean_cell).collect()))
        .collect();

    Table::new(rows)
}

/// Trim whitespace, then drop one leading and one trailing `"` if present.
pub fn clean_cell(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed.strip_prefix('"').unwrap_or(trimmed);
    unquoted.strip_suffix('"').unwrap_or(unquoted).to_string()
}
