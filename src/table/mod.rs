// src/table/mod.rs
pub mod parse;

use serde::Serialize;

pub use parse::parse;

/// One CSV line, as trimmed string cells in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Row(Vec<String>);

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[String] {
        &self.0
    }

    pub fn cell(&self, idx: usize) -> Option<&str> {
        self.0.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A row made of exactly one empty cell is what a blank line splits into.
    pub fn is_blank(&self) -> bool {
        self.0.len() == 1 && self.0[0].is_empty()
    }
}

impl From<Vec<String>> for Row {
    fn from(cells: Vec<String>) -> Self {
        Self(cells)
    }
}

impl<'a> From<Vec<&'a str>> for Row {
    fn from(cells: Vec<&'a str>) -> Self {
        Self(cells.into_iter().map(str::to_string).collect())
    }
}

/// Parsed CSV document. Row 0 is the header; cell counts are not validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Everything after the header, blank lines included.
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Position of the first header cell equal to `name`, if any.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header()?.cells().iter().position(|c| c == name)
    }
}
