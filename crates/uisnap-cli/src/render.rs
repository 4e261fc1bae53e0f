use std::collections::BTreeSet;

use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use uisnap_cli::pipeline::{QueryReport, SnapshotSummary};
use uisnap_model::AttributeMap;

/// Attributes shown first in match tables, in this order. Everything else
/// follows alphabetically.
const IDENTITY_ATTRIBUTES: [&str; 4] = ["type", "name", "label", "value"];

pub fn print_matches(report: &QueryReport) {
    println!("Snapshot: {}", report.snapshot.display());
    if report.matches.is_empty() {
        println!("No matching elements.");
        return;
    }

    let columns = match_columns(&report.matches);
    let mut table = Table::new();
    table.set_header(columns.iter().map(|name| header_cell(name)).collect::<Vec<_>>());
    apply_table_style(&mut table);
    for attributes in &report.matches {
        table.add_row(
            columns
                .iter()
                .map(|column| attribute_cell(attributes.get(column)))
                .collect::<Vec<_>>(),
        );
    }
    println!("{table}");
    match report.matches.len() {
        1 => println!("1 matching element"),
        count => println!("{count} matching elements"),
    }
}

pub fn print_matches_json(report: &QueryReport) -> Result<()> {
    let json = serde_json::to_string_pretty(&report.matches)?;
    println!("{json}");
    Ok(())
}

pub fn print_snapshot_summary(summary: &SnapshotSummary) {
    println!("Snapshot: {}", summary.snapshot.display());
    println!("Windows: {}", summary.root_count);
    println!("Elements: {}", summary.element_count);
    println!("Max depth: {}", summary.max_depth);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Type"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (type_name, count) in &summary.type_counts {
        table.add_row(vec![Cell::new(type_name), Cell::new(count)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.element_count).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

/// Column order for match tables: identity attributes first, the rest
/// alphabetically.
fn match_columns(matches: &[AttributeMap]) -> Vec<String> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for attributes in matches {
        seen.extend(attributes.keys().map(String::as_str));
    }
    let mut columns = Vec::with_capacity(seen.len());
    for name in IDENTITY_ATTRIBUTES {
        if seen.remove(name) {
            columns.push(name.to_string());
        }
    }
    columns.extend(seen.into_iter().map(str::to_string));
    columns
}

fn attribute_cell(value: Option<&String>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
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

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
