//! Table extraction from a grid or a file.

use std::path::Path;

use ftab_ingest::open_grid;
use ftab_map::{Resolution, resolve};
use ftab_model::{BoundField, CellValue, FieldSpec, Grid, MatchError, Normalizer};
use tracing::{debug, info, info_span};

use crate::error::Result;
use crate::options::TableOptions;
use crate::table::{SheetSummary, Table, TableField};

/// Resolves `options` against `grid` and reads every bound column.
///
/// Data rows run from the row after the header to the last row of the
/// grid. Cells missing from short rows read as [`CellValue::Empty`].
///
/// # Errors
///
/// Any [`MatchError`] from validating the options or resolving the header
/// row, and `MissingFields` when `missing_fields_error` is set and a
/// requested field could not be bound.
pub fn extract_table<G>(grid: &G, options: &TableOptions) -> Result<Table>
where
    G: Grid + ?Sized,
{
    let span = info_span!("extract_table", table = options.name.as_deref());
    let _guard = span.enter();

    options.defaults.validate()?;
    let specs = FieldSpec::resolve_all(options.fields.iter().cloned(), &options.defaults)?;
    let resolution = resolve(grid, &specs, &options.header)?;

    let missing: Vec<String> = resolution
        .missing(&specs)
        .into_iter()
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        if options.missing_fields_error {
            return Err(MatchError::MissingFields {
                table: options.name.clone(),
                missing,
            }
            .into());
        }
        debug!(?missing, "fields not found");
    }

    let table = build_table(grid, options, resolution, missing);
    info!(
        header_row = table.sheet.header_row,
        fields = table.fields.len(),
        rows = table.row_count(),
        "extracted table"
    );
    Ok(table)
}

/// Opens the file at `path` and extracts a table from it.
///
/// `sheet` selects a workbook sheet and is ignored for delimited text.
///
/// # Errors
///
/// Ingest errors from opening the source, then anything
/// [`extract_table`] reports.
pub fn open_table(
    path: impl AsRef<Path>,
    sheet: Option<&str>,
    options: &TableOptions,
) -> Result<Table> {
    let grid = open_grid(path, sheet)?;
    let mut table = extract_table(&grid, options)?;
    table.sheet.path = Some(grid.path().to_path_buf());
    table.sheet.sheet_name = grid.sheet_name().map(str::to_string);
    Ok(table)
}

fn build_table<G>(
    grid: &G,
    options: &TableOptions,
    resolution: Resolution,
    missing: Vec<String>,
) -> Table
where
    G: Grid + ?Sized,
{
    let Resolution {
        header_row,
        header_ratio,
        fields,
        ..
    } = resolution;
    let row_count = grid.row_count();
    let first_data_row = header_row + 1;

    let fields = fields
        .into_iter()
        .map(|field| {
            let data = column_data(grid, &field, first_data_row);
            TableField { field, data }
        })
        .collect();

    let row_numbers = (first_data_row..=row_count)
        .map(|row| CellValue::Int(i64::try_from(row).unwrap_or(i64::MAX)))
        .collect();

    Table {
        name: options.name.clone(),
        fields,
        missing,
        row_numbers,
        sheet: SheetSummary {
            path: None,
            sheet_name: None,
            header_row,
            header_ratio,
            row_count,
        },
        include_row_num: options.include_row_num,
    }
}

fn column_data<G>(grid: &G, field: &BoundField, first_data_row: usize) -> Vec<CellValue>
where
    G: Grid + ?Sized,
{
    let normalizer = field.normalizer();
    match field {
        BoundField::Single(single) => grid
            .column_values(single.column, first_data_row)
            .into_iter()
            .map(|value| normalize(normalizer, value))
            .collect(),
        BoundField::Multi(multi) => (first_data_row..=grid.row_count())
            .map(|row| {
                let members = multi
                    .columns
                    .iter()
                    .map(|&column| {
                        let value = grid.column_at(row, column).cloned().unwrap_or_default();
                        normalize(normalizer, value)
                    })
                    .collect();
                CellValue::List(members)
            })
            .collect(),
    }
}

fn normalize(normalizer: Option<&Normalizer>, value: CellValue) -> CellValue {
    match normalizer {
        Some(normalizer) => normalizer.apply(&value),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use ftab_model::{FieldPattern, MemoryGrid};

    use super::*;
    use crate::TableError;

    fn people() -> MemoryGrid {
        MemoryGrid::from_text([
            vec!["Staff report", "", ""],
            vec!["first_name", "last_name", "age"],
            vec!["Rose", "Tyler", "19"],
            vec!["Amy", "Pond"],
        ])
    }

    #[test]
    fn reads_columns_below_the_header() {
        let options = TableOptions::new()
            .fields(["first_name", "age"])
            .header_row(2);
        let table = extract_table(&people(), &options).unwrap();

        assert_eq!(
            table.get("first_name").unwrap(),
            &[CellValue::text("Rose"), CellValue::text("Amy")]
        );
        assert_eq!(
            table.get("age").unwrap(),
            &[CellValue::text("19"), CellValue::Empty]
        );
        assert_eq!(
            table.get("row").unwrap(),
            &[CellValue::Int(3), CellValue::Int(4)]
        );
        assert_eq!(table.sheet().header_row, 2);
        assert_eq!(table.sheet().row_count, 4);
    }

    #[test]
    fn missing_fields_are_skipped_unless_strict() {
        let options = TableOptions::new()
            .name("people")
            .fields(["first_name", "salary"])
            .header_row(2);
        let table = extract_table(&people(), &options).unwrap();
        assert!(table.get("salary").is_none());

        let err = extract_table(&people(), &options.missing_fields_error(true)).unwrap_err();
        match err {
            TableError::Match(MatchError::MissingFields { table, missing }) => {
                assert_eq!(table.as_deref(), Some("people"));
                assert_eq!(missing, vec!["salary".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unbound_spec_sharing_a_name_is_missing() {
        let grid = MemoryGrid::from_text([vec!["name", "id"], vec!["Amy", "7"]]);
        let options = TableOptions::new()
            .field("name")
            .field(FieldPattern::new("name").alias("surname"));

        let table = extract_table(&grid, &options).unwrap();
        assert_eq!(table.fields().len(), 1);
        assert_eq!(table.missing(), &["name".to_string()]);

        let err = extract_table(&grid, &options.missing_fields_error(true)).unwrap_err();
        match err {
            TableError::Match(MatchError::MissingFields { table, missing }) => {
                assert_eq!(table, None);
                assert_eq!(missing, vec!["name".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn normalizer_runs_on_every_value() {
        let upper = Normalizer::new(|value: &CellValue| {
            CellValue::text(value.as_text().to_uppercase())
        });
        let options = TableOptions::new()
            .field(FieldPattern::new("last_name").normalizer(upper))
            .header_row(2);
        let table = extract_table(&people(), &options).unwrap();
        assert_eq!(
            table.get("last_name").unwrap(),
            &[CellValue::text("TYLER"), CellValue::text("POND")]
        );
    }

    #[test]
    fn multi_column_fields_yield_lists() {
        let grid = MemoryGrid::from_text([
            vec!["name", "score 1", "score 2"],
            vec!["Rose", "4", "5"],
            vec!["Amy", "3"],
        ]);
        let options = TableOptions::new().field(
            FieldPattern::new("score")
                .mode(ftab_model::MatchMode::Contains)
                .multi_column(true),
        );
        let table = extract_table(&grid, &options).unwrap();
        assert_eq!(
            table.get("score").unwrap(),
            &[
                CellValue::List(vec![CellValue::text("4"), CellValue::text("5")]),
                CellValue::List(vec![CellValue::text("3"), CellValue::Empty]),
            ]
        );
    }

    #[test]
    fn invalid_defaults_fail_before_resolution() {
        let options = TableOptions::new().min_ratio(0.0);
        let err = extract_table(&people(), &options).unwrap_err();
        assert!(matches!(
            err,
            TableError::Match(MatchError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn header_row_beyond_sheet_is_rejected() {
        let options = TableOptions::new().header_row(9);
        let err = extract_table(&people(), &options).unwrap_err();
        assert!(matches!(
            err,
            TableError::Match(MatchError::InvalidRow { row: 9, available: 4 })
        ));
    }
}
