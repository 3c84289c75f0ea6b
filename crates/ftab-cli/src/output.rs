//! Machine-readable output for extracted tables.

use std::io::Write;

use anyhow::{Context, Result};
use ftab_core::{Record, SheetSummary, Table};
use ftab_model::BoundField;
use serde::Serialize;

/// Resolved header row and field bindings, as printed by `ftab headers`.
#[derive(Debug, Serialize)]
pub struct HeaderReport<'a> {
    pub table: Option<&'a str>,
    pub sheet: &'a SheetSummary,
    pub fields: Vec<&'a BoundField>,
}

impl<'a> HeaderReport<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self {
            table: table.name(),
            sheet: table.sheet(),
            fields: table.fields().iter().map(|field| &field.field).collect(),
        }
    }
}

/// First `limit` records, or all of them.
pub fn limited_records(table: &Table, limit: Option<usize>) -> Vec<Record> {
    table
        .records()
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

pub fn write_json<W: Write>(mut writer: W, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value).context("serialize json")?;
    writeln!(writer).context("write json")?;
    Ok(())
}

/// Writes records as CSV with one column per table key.
///
/// List values are joined with `", "`; empty cells are written as empty
/// fields.
pub fn write_csv<W: Write>(writer: W, table: &Table, limit: Option<usize>) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(table.keys()).context("write csv header")?;
    for record in limited_records(table, limit) {
        csv.write_record(record.iter().map(|(_, value)| value.as_text()))
            .context("write csv record")?;
    }
    csv.flush().context("flush csv output")?;
    Ok(())
}
