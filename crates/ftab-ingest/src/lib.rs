//! Grid sources for fuzzy table extraction.
//!
//! Sources read a whole sheet into memory when opened, so file and sheet
//! errors surface from `open` and reading rows afterwards cannot fail.

pub mod csv_grid;
pub mod error;
pub mod source;
pub mod workbook;

pub use csv_grid::{CsvGrid, validate_encoding};
pub use error::{IngestError, Result};
pub use source::{SheetGrid, SourceKind, open_grid};
pub use workbook::{WorkbookGrid, data_to_cell_value, rows_from_range};
