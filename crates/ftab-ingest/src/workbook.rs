//! Spreadsheet workbook grid source (xlsx, xlsm, xlsb, xls, ods).

use std::path::{Path, PathBuf};

use calamine::{Data, Range, Reader, open_workbook_auto};
use ftab_model::{CellValue, Grid};
use tracing::debug;

use crate::error::{IngestError, Result};

/// One worksheet held in memory.
///
/// Row and column numbers match the sheet: leading empty rows and columns
/// that the workbook does not store are filled with empty cells.
#[derive(Debug, Clone)]
pub struct WorkbookGrid {
    path: PathBuf,
    sheet_name: String,
    rows: Vec<Vec<CellValue>>,
}

impl WorkbookGrid {
    /// Opens `sheet`, or the first sheet when `sheet` is `None`.
    ///
    /// # Errors
    ///
    /// `FileNotFound`, `Workbook` when the file cannot be read as a
    /// workbook, and `SheetNotFound`.
    pub fn open(path: impl AsRef<Path>, sheet: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IngestError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let mut workbook = open_workbook_auto(path).map_err(|source| IngestError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;
        let available = workbook.sheet_names();

        let sheet_name = match sheet {
            Some(name) => available
                .iter()
                .find(|candidate| candidate.as_str() == name)
                .cloned()
                .ok_or_else(|| IngestError::SheetNotFound {
                    path: path.to_path_buf(),
                    sheet: name.to_string(),
                    available: available.clone(),
                })?,
            None => available
                .first()
                .cloned()
                .ok_or_else(|| IngestError::SheetNotFound {
                    path: path.to_path_buf(),
                    sheet: String::new(),
                    available: Vec::new(),
                })?,
        };

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|source| IngestError::Workbook {
                path: path.to_path_buf(),
                source,
            })?;
        let rows = rows_from_range(&range);

        debug!(path = %path.display(), sheet = %sheet_name, rows = rows.len(), "loaded workbook grid");
        Ok(Self {
            path: path.to_path_buf(),
            sheet_name,
            rows,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }
}

impl Grid for WorkbookGrid {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row(&self, number: usize) -> Option<&[CellValue]> {
        self.rows.get(number.checked_sub(1)?).map(Vec::as_slice)
    }
}

/// Materializes a range, padding for its start offset.
pub fn rows_from_range(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let Some((start_row, start_column)) = range.start() else {
        return Vec::new();
    };
    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; start_column as usize];
        cells.extend(row.iter().map(data_to_cell_value));
        rows.push(cells);
    }
    rows
}

/// Converts a calamine cell.
///
/// Excel datetimes become [`CellValue::DateTime`] when they map to a
/// calendar date, otherwise their serial number.
pub fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::text(s.clone()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or(CellValue::Float(dt.as_f64()), CellValue::DateTime),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}
