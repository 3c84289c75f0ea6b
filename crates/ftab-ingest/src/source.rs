//! Extension-based dispatch to a grid source.

use std::path::Path;

use ftab_model::{CellValue, Grid};

use crate::csv_grid::CsvGrid;
use crate::error::{IngestError, Result};
use crate::workbook::WorkbookGrid;

/// Kind of source a path opens as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Csv { delimiter: u8 },
    Workbook,
}

impl SourceKind {
    /// Classifies `path` by its extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" | "txt" => Some(Self::Csv { delimiter: b',' }),
            "tsv" => Some(Self::Csv { delimiter: b'\t' }),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Workbook),
            _ => None,
        }
    }
}

/// An opened sheet from any supported source.
#[derive(Debug, Clone)]
pub enum SheetGrid {
    Csv(CsvGrid),
    Workbook(WorkbookGrid),
}

impl SheetGrid {
    pub fn path(&self) -> &Path {
        match self {
            Self::Csv(grid) => grid.path(),
            Self::Workbook(grid) => grid.path(),
        }
    }

    /// Worksheet name; delimited files have none.
    pub fn sheet_name(&self) -> Option<&str> {
        match self {
            Self::Csv(_) => None,
            Self::Workbook(grid) => Some(grid.sheet_name()),
        }
    }
}

impl Grid for SheetGrid {
    fn row_count(&self) -> usize {
        match self {
            Self::Csv(grid) => grid.row_count(),
            Self::Workbook(grid) => grid.row_count(),
        }
    }

    fn row(&self, number: usize) -> Option<&[CellValue]> {
        match self {
            Self::Csv(grid) => grid.row(number),
            Self::Workbook(grid) => grid.row(number),
        }
    }
}

/// Opens `path` as a CSV or workbook grid based on its extension.
///
/// `sheet` selects a worksheet and is ignored for delimited files.
///
/// # Errors
///
/// `FileNotFound` is reported before the extension is checked; unknown
/// extensions fail with `UnsupportedFile`.
pub fn open_grid(path: impl AsRef<Path>, sheet: Option<&str>) -> Result<SheetGrid> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    match SourceKind::from_path(path) {
        Some(SourceKind::Csv { delimiter }) => {
            CsvGrid::open_with_delimiter(path, delimiter).map(SheetGrid::Csv)
        }
        Some(SourceKind::Workbook) => WorkbookGrid::open(path, sheet).map(SheetGrid::Workbook),
        None => Err(IngestError::UnsupportedFile {
            path: path.to_path_buf(),
        }),
    }
}
