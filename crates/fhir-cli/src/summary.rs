use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fhir_model::{FieldInfo, TypeShape};

use crate::types::ConvertResult;

/// Print the run summary.
///
/// Goes to stderr when the records themselves were written to stdout.
pub fn print_summary(result: &ConvertResult) {
    let mut lines = vec![
        format!("Resource: {}", result.resource_type),
        format!("Input: {}", result.input.display()),
    ];
    match &result.output {
        Some(path) => lines.push(format!("Output: {} ({})", path.display(), result.format)),
        None => lines.push(format!("Output: stdout ({})", result.format)),
    }
    lines.push(format!("Elapsed: {:.2?}", result.elapsed));
    let table = summary_table(result);

    if result.output.is_none() {
        for line in &lines {
            eprintln!("{line}");
        }
        eprintln!("{table}");
    } else {
        for line in &lines {
            println!("{line}");
        }
        println!("{table}");
    }
}

pub fn summary_table(result: &ConvertResult) -> Table {
    let summary = &result.summary;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Rows"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![Cell::new("Read"), Cell::new(summary.rows)]);
    table.add_row(vec![
        Cell::new("Written"),
        count_cell(summary.written, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Failed"),
        count_cell(summary.failed, Color::Red),
    ]);
    if result.validated {
        table.add_row(vec![
            Cell::new("Validation flagged"),
            count_cell(summary.flagged, Color::Yellow),
        ]);
        table.add_row(vec![
            Cell::new("Rejected by validation"),
            count_cell(summary.rejected, Color::Red),
        ]);
    }
    table
}

/// Catalog listing: one row per resource type.
pub fn types_table(shapes: &[&TypeShape]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Resource"), header_cell("Fields")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for shape in shapes {
        table.add_row(vec![
            Cell::new(shape.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(shape.fields.len()),
        ]);
    }
    table
}

/// Field listing for one resource type.
pub fn fields_table(fields: &[FieldInfo]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Kind")]);
    apply_table_style(&mut table);
    for field in fields {
        let kind = if field.kind.is_array() {
            Cell::new(field.kind).fg(Color::Magenta)
        } else {
            Cell::new(field.kind)
        };
        table.add_row(vec![Cell::new(field.name), kind]);
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

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
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

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use fhir_cli::pipeline::RunSummary;
    use fhir_model::TypeCatalog;
    use fhir_output::OutputFormat;

    use super::*;

    fn result(validated: bool) -> ConvertResult {
        ConvertResult {
            resource_type: "Observation",
            input: PathBuf::from("obs.csv"),
            output: None,
            format: OutputFormat::Ndjson,
            validated,
            summary: RunSummary {
                rows: 3,
                written: 2,
                failed: 1,
                rejected: 0,
                flagged: 1,
            },
            elapsed: Duration::from_millis(5),
        }
    }

    #[test]
    fn validation_rows_only_when_validating() {
        assert_eq!(summary_table(&result(false)).row_count(), 3);
        assert_eq!(summary_table(&result(true)).row_count(), 5);
    }

    #[test]
    fn fields_table_lists_every_field() {
        let shape = fhir_model::default_catalog()
            .lookup("Patient")
            .unwrap();
        let rendered = fields_table(shape.fields).to_string();
        assert!(rendered.contains("gender"));
        assert!(rendered.contains("array of object HumanName"));
    }
}
