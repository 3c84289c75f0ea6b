//! Fuzzy table extraction.
//!
//! [`extract_table`] locates the header row of a grid, binds the requested
//! fields to columns and reads their data into a [`Table`]. [`open_table`]
//! does the same for a CSV, TSV or workbook file on disk.

pub mod error;
pub mod extract;
pub mod options;
pub mod table;

pub use error::{Result, TableError};
pub use extract::{extract_table, open_table};
pub use options::TableOptions;
pub use table::{ROW_FIELD, Record, Records, SheetSummary, Table, TableField};

pub use ftab_map::{HeaderRow, Seek};
pub use ftab_model::{CellValue, FieldInput, FieldPattern, MatchError, MatchMode, Normalizer};
