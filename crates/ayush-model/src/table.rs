//! Untyped tabular data as loaded from a source file.

use std::collections::BTreeMap;

/// A generic row record: column name to cell value.
pub type Record = BTreeMap<String, String>;

/// Rows × named columns, every cell kept as text.
///
/// Rows are stored positionally and always padded to the header width, so
/// `rows[i][j]` is the cell of `headers[j]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// An empty placeholder used when a source is absent.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column named exactly `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell text at (`row`, `column`), if both exist.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(index))
            .map(String::as_str)
    }

    /// Full field set of one row as a record.
    ///
    /// When headers repeat, the first occurrence wins.
    pub fn record(&self, row: usize) -> Option<Record> {
        let cells = self.rows.get(row)?;
        let mut record = Record::new();
        for (header, value) in self.headers.iter().zip(cells) {
            record
                .entry(header.clone())
                .or_insert_with(|| value.clone());
        }
        Some(record)
    }

    /// Rename headers in place with `f`.
    pub fn map_headers(&mut self, f: impl Fn(&str) -> String) {
        for header in &mut self.headers {
            *header = f(header);
        }
    }
}
