use std::fs::File;
use std::io::Read;
use std::path::Path;

use ayush_model::RawTable;
use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a headed CSV file into a [`RawTable`].
///
/// Header text keeps its casing (column matching normalizes later); cells are
/// trimmed, fully blank rows skipped, and ragged rows padded.
pub fn read_raw_table(path: &Path) -> Result<RawTable> {
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_raw_table_from_reader(file).map_err(|source| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read headed CSV from any reader.
pub fn read_raw_table_from_reader<R: Read>(reader: R) -> csv::Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();
    let mut table = RawTable::new(headers);
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        table.push_row(row);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_whitespace_collapses() {
        assert_eq!(normalize_header("\u{feff} Short   Definition "), "Short Definition");
    }

    #[test]
    fn blank_rows_are_skipped() {
        let table = read_raw_table_from_reader("A,B\n1,x\n,\n 2 , y \n".as_bytes())
            .expect("read csv");
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1], vec!["2".to_string(), "y".to_string()]);
    }

    #[test]
    fn ragged_rows_are_padded() {
        let table = read_raw_table_from_reader("A,B,C\n1\n".as_bytes()).expect("read csv");
        assert_eq!(table.rows[0], vec!["1".to_string(), String::new(), String::new()]);
    }
}
