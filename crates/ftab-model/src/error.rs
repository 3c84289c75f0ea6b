//! Error types for field specification and header resolution.

use thiserror::Error;

/// Errors raised while building field specifications or resolving a table.
///
/// All of these are fail-fast: the engine never retries or degrades a
/// malformed request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// A header row that is not a positive integer, or that the sheet does
    /// not have (including any row of an empty sheet).
    #[error(
        "header_row must be a positive, non-zero integer within the sheet's {available} rows. You entered {row}."
    )]
    InvalidRow { row: i64, available: usize },

    /// Seeking without search criteria, or an unusable field input.
    #[error("invalid fields: {reason}")]
    InvalidField { reason: String },

    /// Seek bound that is neither `true` nor a positive integer.
    #[error("header_row_seek must be true or a positive integer. You entered {value}.")]
    InvalidSeek { value: String },

    /// Similarity threshold outside `(0, 1]`.
    #[error("min_ratio must be a number 0 < x <= 1. You passed {value}")]
    InvalidThreshold { value: f64 },

    /// Unrecognized matching mode token.
    #[error("mode must be one of [\"exact\", \"approx\", \"contains\"]. You passed {value:?} instead.")]
    InvalidMode { value: String },

    /// Strict mode: one or more requested fields were never bound.
    #[error("{}", missing_fields_message(.table.as_deref(), .missing))]
    MissingFields {
        table: Option<String>,
        missing: Vec<String>,
    },
}

impl MatchError {
    pub fn invalid_field(reason: impl Into<String>) -> Self {
        Self::InvalidField {
            reason: reason.into(),
        }
    }
}

fn missing_fields_message(table: Option<&str>, missing: &[String]) -> String {
    match table {
        Some(name) => format!("the {name:?} table is missing fields {missing:?}"),
        None => format!("the table is missing fields {missing:?}"),
    }
}

/// Result type for matching operations.
pub type Result<T> = std::result::Result<T, MatchError>;
