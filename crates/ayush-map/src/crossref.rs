//! Merged-table cross-references between Siddha and Unani codes.

use ayush_model::{Discipline, RawTable, Record, SIDDHA_CODE_COLUMN, UNANI_CODE_COLUMN};

use crate::normalize::normalize_header;

/// Misspelling of `siddha_code` found in some merged datasets.
const SIDDHA_CODE_ALIAS: &str = "sidha_code";

/// The merged dataset, ready for point lookups by code.
///
/// Headers are normalized, `sidha_code` is read as `siddha_code`, and both
/// code columns are trimmed once up front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedTable {
    table: RawTable,
}

impl MergedTable {
    pub fn from_raw(mut table: RawTable) -> Self {
        table.map_headers(normalize_header);
        if !table.has_column(SIDDHA_CODE_COLUMN) {
            if let Some(index) = table.column_index(SIDDHA_CODE_ALIAS) {
                table.headers[index] = SIDDHA_CODE_COLUMN.to_string();
            }
        }
        for column in [SIDDHA_CODE_COLUMN, UNANI_CODE_COLUMN] {
            if let Some(index) = table.column_index(column) {
                for row in &mut table.rows {
                    if let Some(cell) = row.get_mut(index) {
                        let trimmed = cell.trim();
                        if trimmed.len() != cell.len() {
                            *cell = trimmed.to_string();
                        }
                    }
                }
            }
        }
        Self { table }
    }

    /// Stand-in for a merged dataset that was not supplied.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.table.headers
    }

    /// First row whose `column` equals `code` after trimming the input.
    pub fn lookup(&self, column: &str, code: &str) -> Option<Record> {
        let index = self.table.column_index(column)?;
        let code = code.trim();
        let row = self
            .table
            .rows
            .iter()
            .position(|cells| cells.get(index).is_some_and(|cell| cell == code))?;
        self.table.record(row)
    }
}

/// Merged record cross-referencing `code` of `discipline`, if any.
///
/// Exact string equality only; absent tables and columns yield `None`.
pub fn resolve_merged(merged: &MergedTable, discipline: Discipline, code: &str) -> Option<Record> {
    if merged.is_empty() {
        return None;
    }
    merged.lookup(discipline.merged_code_column(), code)
}
