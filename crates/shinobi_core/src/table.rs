//! Pipe-delimited table rendering and parsing used by every memo tab.
//!
//! A table is a label row, an alignment row, then one `|cell|cell|` row per
//! entry. Parsing accepts exactly what rendering produces and skips anything
//! else without failing, since the memo text is user-editable.

use crate::text::normalize;

pub const CHECKED: &str = "[x]";
pub const UNCHECKED: &str = "[ ]";
const LINE_BREAK: &str = "<br>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

impl Align {
    fn marker(self) -> &'static str {
        match self {
            Self::Left => ":---",
            Self::Right => "---:",
            Self::Center => ":---:",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub label: &'static str,
    pub align: Align,
}

impl Column {
    pub const fn left(label: &'static str) -> Self {
        Self {
            label,
            align: Align::Left,
        }
    }

    pub const fn right(label: &'static str) -> Self {
        Self {
            label,
            align: Align::Right,
        }
    }

    pub const fn center(label: &'static str) -> Self {
        Self {
            label,
            align: Align::Center,
        }
    }
}

pub fn checkbox(checked: bool) -> &'static str {
    if checked { CHECKED } else { UNCHECKED }
}

/// Read a leading `[x]` / `[ ]` marker from a cell.
pub fn parse_checkbox(cell: &str) -> Option<bool> {
    split_checkbox(cell).map(|(checked, _)| checked)
}

/// Split a cell into its leading checkbox state and the text after it.
pub fn split_checkbox(cell: &str) -> Option<(bool, &str)> {
    let cell = cell.trim_start();
    if let Some(rest) = cell.strip_prefix(CHECKED) {
        Some((true, rest))
    } else {
        cell.strip_prefix(UNCHECKED).map(|rest| (false, rest))
    }
}

/// Keep a value on one table row: line breaks become `<br>` and pipes become
/// full-width bars.
pub fn escape_cell(text: &str) -> String {
    text.replace("\r\n", LINE_BREAK)
        .replace(['\r', '\n'], LINE_BREAK)
        .replace('|', "｜")
}

/// Inverse of [`escape_cell`]. Stray carriage returns typed into the memo
/// come back as plain `\n`.
pub fn unescape_cell(cell: &str) -> String {
    normalize(&cell.replace(LINE_BREAK, "\n"))
}

pub fn render_row<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = String::from("|");
    for cell in cells {
        line.push_str(cell.as_ref());
        line.push('|');
    }
    line
}

pub fn alignment_row(columns: &[Column]) -> String {
    render_row(columns.iter().map(|c| c.align.marker()))
}

/// Render a full table. Each row must have one (unescaped) value per column.
pub fn render_table(columns: &[Column], rows: &[Vec<String>]) -> Vec<String> {
    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(render_row(columns.iter().map(|c| c.label)));
    out.push(alignment_row(columns));
    for row in rows {
        out.push(render_row(row.iter().map(|cell| escape_cell(cell))));
    }
    out
}

/// Split a `|a|b|c|` line into its raw cells.
pub fn split_row(line: &str) -> Option<Vec<&str>> {
    let line = line.trim_end();
    let inner = line.strip_prefix('|')?.strip_suffix('|')?;
    Some(inner.split('|').collect())
}

pub fn is_alignment_row(cells: &[&str]) -> bool {
    !cells.is_empty()
        && cells.iter().all(|cell| {
            let cell = cell.trim();
            let body = cell.strip_prefix(':').unwrap_or(cell);
            let body = body.strip_suffix(':').unwrap_or(body);
            !body.is_empty() && body.chars().all(|ch| ch == '-')
        })
}

/// Parse the first table in `text` whose label row matches `columns`.
///
/// Rows with the wrong cell count are skipped; the table ends at the first
/// line that is not a table row. A missing table yields no rows.
pub fn parse_table(text: &str, columns: &[Column]) -> Vec<Vec<String>> {
    let mut lines = text.lines();
    while let Some(line) = lines.next() {
        let Some(cells) = split_row(line) else {
            continue;
        };
        let is_header = cells.len() == columns.len()
            && cells
                .iter()
                .zip(columns)
                .all(|(cell, column)| cell.trim() == column.label);
        if !is_header {
            continue;
        }

        let Some(alignment) = lines.next().and_then(split_row) else {
            return Vec::new();
        };
        if !is_alignment_row(&alignment) {
            continue;
        }

        let mut rows = Vec::new();
        for line in lines.by_ref() {
            let Some(cells) = split_row(line) else {
                break;
            };
            if cells.len() != columns.len() {
                continue;
            }
            rows.push(cells.iter().map(|cell| unescape_cell(cell)).collect());
        }
        return rows;
    }
    Vec::new()
}
