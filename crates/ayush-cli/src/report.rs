//! Terminal tables for lookup results and table loads.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ayush_map::TableSummary;
use ayush_model::{ConfirmedMatch, MatchCandidate, Resolution};

/// Table for a resolution; `None` when there is nothing to tabulate.
pub fn resolution_table(resolution: &Resolution) -> Option<Table> {
    match resolution {
        Resolution::Matched(confirmed) => Some(confirmed_table(confirmed)),
        Resolution::Suggestions { suggestions, .. } => Some(suggestions_table(suggestions)),
        Resolution::NoMatch { .. } => None,
    }
}

fn confirmed_table(confirmed: &ConfirmedMatch) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new("Discipline"),
        Cell::new(confirmed.discipline)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Code"),
        Cell::new(&confirmed.code).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Label"), Cell::new(&confirmed.label)]);
    table.add_row(vec![
        Cell::new("Matched by"),
        Cell::new(confirmed.matched_by.as_str()),
    ]);
    match &confirmed.merged {
        Some(record) => {
            for (column, value) in record {
                table.add_row(vec![dim_cell(format!("merged.{column}")), Cell::new(value)]);
            }
        }
        None => {
            table.add_row(vec![dim_cell("merged"), dim_cell("-")]);
        }
    }
    table
}

fn suggestions_table(suggestions: &[MatchCandidate]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Discipline"),
        header_cell("Code"),
        header_cell("Label"),
        header_cell("Score"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for (rank, candidate) in suggestions.iter().enumerate() {
        let score = match candidate.score {
            Some(score) => Cell::new(format!("{score:.1}")).fg(Color::Yellow),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(candidate.discipline),
            Cell::new(&candidate.code),
            Cell::new(&candidate.label),
            score,
        ]);
    }
    table
}

/// One row per discipline table with its load outcome.
pub fn summary_table(summaries: &[TableSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("Searchable"),
        header_cell("Dropped"),
        header_cell("Text column"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for summary in summaries {
        let status = match &summary.error {
            Some(error) => Cell::new(error).fg(Color::Red),
            None if summary.source_rows == 0 => dim_cell("empty"),
            None => Cell::new("ok").fg(Color::Green),
        };
        table.add_row(vec![
            Cell::new(summary.discipline)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.source_rows),
            Cell::new(summary.prepared_rows),
            count_cell(summary.dropped_rows),
            summary
                .text_source
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            status,
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
