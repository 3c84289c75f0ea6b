//! Error types for grid sources.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while opening a grid source.
///
/// A sheet that exists but has no rows is not an error here; it opens as
/// an empty grid.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is not a known CSV or workbook format.
    #[error("unsupported file type: {path}")]
    UnsupportedFile { path: PathBuf },

    /// File starts with a byte order mark for an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}; save the file as UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Parsing Errors ===
    /// Malformed CSV record.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Workbook could not be opened or a sheet could not be read.
    #[error("failed to read workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    // === Sheet Errors ===
    /// Named sheet is not in the workbook.
    #[error("sheet {sheet:?} not found in {path}; available sheets: {available:?}")]
    SheetNotFound {
        path: PathBuf,
        sheet: String,
        available: Vec<String>,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
