use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ftab_cli::output::limited_records;
use ftab_core::{CellValue, Table as ExtractedTable, TableField};

pub fn print_records(table: &ExtractedTable, limit: Option<usize>) {
    let records = limited_records(table, limit);
    let mut output = Table::new();
    output.set_header(table.keys().map(header_cell).collect::<Vec<_>>());
    apply_table_style(&mut output);
    for record in &records {
        output.add_row(record.iter().map(|(_, value)| value_cell(value)).collect::<Vec<_>>());
    }
    println!("{output}");
    println!("{} of {} records", records.len(), table.row_count());
}

pub fn print_headers(table: &ExtractedTable) {
    let sheet = table.sheet();
    if let Some(name) = table.name() {
        println!("Table: {name}");
    }
    if let Some(path) = &sheet.path {
        println!("Source: {}", path.display());
    }
    if let Some(name) = &sheet.sheet_name {
        println!("Sheet: {name}");
    }
    println!(
        "Header row: {} of {} (ratio {:.3})",
        sheet.header_row, sheet.row_count, sheet.header_ratio
    );

    let mut output = Table::new();
    output.set_header(vec![
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Headers"),
        header_cell("Columns"),
        header_cell("Ratio"),
    ]);
    apply_summary_table_style(&mut output);
    align_column(&mut output, 3, CellAlignment::Right);
    align_column(&mut output, 4, CellAlignment::Right);
    for field in table.fields() {
        output.add_row(field_row(field));
    }
    println!("{output}");
}

fn field_row(field: &TableField) -> Vec<Cell> {
    let bound = &field.field;
    let kind = if bound.is_multi() {
        Cell::new("multi").fg(Color::Magenta)
    } else {
        dim_cell("single")
    };
    let columns = bound
        .columns()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    vec![
        Cell::new(field.name())
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        kind,
        Cell::new(bound.headers().join(", ")),
        Cell::new(columns),
        ratio_cell(bound.ratio()),
    ]
}

fn ratio_cell(ratio: f64) -> Cell {
    let color = if ratio >= 1.0 {
        Color::Green
    } else if ratio > 0.0 {
        Color::Yellow
    } else {
        Color::DarkGrey
    };
    Cell::new(format!("{ratio:.3}")).fg(color)
}

fn value_cell(value: &CellValue) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value.as_text())
    }
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
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
