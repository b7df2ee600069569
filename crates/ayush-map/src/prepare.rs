//! Reduce raw discipline tables to searchable rows.

use ayush_model::{Discipline, LookupError, PreparedRow, PreparedTable, RawTable, Result, TableSchema};
use tracing::debug;

use crate::normalize::{normalize_header, normalize_str};

/// Prepare `raw` using the discipline's own column schema.
pub fn prepare_discipline(raw: &RawTable, discipline: Discipline) -> Result<PreparedTable> {
    prepare(raw, &discipline.schema(), discipline)
}

/// Build the searchable form of a discipline table.
///
/// Column names are matched in normalized header form. The first code
/// candidate present supplies codes; the first text candidate present
/// supplies labels. Rows whose label normalizes to nothing are dropped.
///
/// A table with neither headers nor rows is an absent source and prepares
/// to an empty table.
///
/// # Errors
///
/// [`LookupError::Schema`] when no code candidate or no text candidate
/// exists in a table that has headers.
pub fn prepare(raw: &RawTable, schema: &TableSchema, discipline: Discipline) -> Result<PreparedTable> {
    if raw.headers.is_empty() && raw.rows.is_empty() {
        return Ok(PreparedTable::empty(discipline));
    }

    let headers: Vec<String> = raw.headers.iter().map(|h| normalize_header(h)).collect();
    let (code_index, code_column) = select_column(&headers, schema.code_columns)
        .ok_or_else(|| LookupError::schema(discipline.as_str(), schema.code_columns))?;
    let (text_index, text_source) = select_column(&headers, schema.text_columns)
        .ok_or_else(|| LookupError::schema(discipline.as_str(), schema.text_columns))?;

    let mut rows = Vec::with_capacity(raw.rows.len());
    let mut dropped = 0usize;
    for (source_row, cells) in raw.rows.iter().enumerate() {
        let label = cells.get(text_index).map(String::as_str).unwrap_or_default();
        let normalized_text = normalize_str(label);
        if normalized_text.is_empty() {
            dropped += 1;
            continue;
        }
        let code = cells
            .get(code_index)
            .map(|value| value.trim())
            .unwrap_or_default();
        rows.push(PreparedRow {
            discipline,
            code: code.to_string(),
            label: label.to_string(),
            normalized_text,
            source_row,
        });
    }

    debug!(
        discipline = %discipline,
        text_source,
        rows = rows.len(),
        dropped,
        "prepared table"
    );

    Ok(PreparedTable {
        discipline,
        code_column: code_column.to_string(),
        text_source: text_source.to_string(),
        rows,
        dropped,
    })
}

fn select_column<'s>(headers: &[String], candidates: &[&'s str]) -> Option<(usize, &'s str)> {
    candidates.iter().find_map(|candidate| {
        headers
            .iter()
            .position(|header| header == candidate)
            .map(|index| (index, *candidate))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        let mut table = RawTable::new(headers.iter().map(|h| (*h).to_string()).collect());
        for row in rows {
            table.push_row(row.iter().map(|c| (*c).to_string()).collect());
        }
        table
    }

    #[test]
    fn prefers_short_definition() {
        let table = raw(
            &["NAMC_CODE", "NAMC_TERM", "Short Definition"],
            &[&[" SA1 ", "Suram", "Fever"]],
        );
        let prepared = prepare_discipline(&table, Discipline::Siddha).expect("prepare");
        assert_eq!(prepared.text_source, "short_definition");
        assert_eq!(prepared.rows[0].label, "Fever");
        assert_eq!(prepared.rows[0].normalized_text, "fever");
        assert_eq!(prepared.rows[0].code, "SA1");
    }

    #[test]
    fn falls_back_to_term_column() {
        let table = raw(&["NUMC CODE", "NUMC TERM"], &[&["U1", "Humma"]]);
        let prepared = prepare_discipline(&table, Discipline::Unani).expect("prepare");
        assert_eq!(prepared.text_source, "numc_term");
        assert_eq!(prepared.rows[0].label, "Humma");
        assert_eq!(prepared.rows[0].discipline, Discipline::Unani);
    }

    #[test]
    fn blank_labels_are_dropped() {
        let table = raw(
            &["namc_code", "short_definition"],
            &[&["S1", "  "], &["S2", "Cough"], &["S3", ""]],
        );
        let prepared = prepare_discipline(&table, Discipline::Siddha).expect("prepare");
        assert_eq!(prepared.len(), 1);
        assert_eq!(prepared.dropped, 2);
        assert_eq!(prepared.rows[0].source_row, 1);
    }

    #[test]
    fn missing_code_column_is_schema_error() {
        let table = raw(&["short_definition"], &[&["Fever"]]);
        let err = prepare_discipline(&table, Discipline::Siddha).unwrap_err();
        assert!(matches!(err, LookupError::Schema { ref table, .. } if table == "Siddha"));
    }

    #[test]
    fn missing_text_column_is_schema_error() {
        let table = raw(&["numc_code"], &[&["U1"]]);
        assert!(prepare_discipline(&table, Discipline::Unani).is_err());
    }

    #[test]
    fn absent_table_prepares_empty() {
        let prepared = prepare_discipline(&RawTable::empty(), Discipline::Unani).expect("prepare");
        assert!(prepared.is_empty());
    }
}
