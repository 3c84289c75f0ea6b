//! Error type for table extraction.

use ftab_ingest::IngestError;
use ftab_model::MatchError;
use thiserror::Error;

/// Errors from opening a source or resolving a table against it.
///
/// Both kinds pass through unchanged.
#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Result type for table extraction.
pub type Result<T> = std::result::Result<T, TableError>;
