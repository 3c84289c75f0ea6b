//! Data model for fuzzy table extraction.
//!
//! Callers describe desired fields with [`FieldInput`]/[`FieldPattern`],
//! which resolve against [`TableDefaults`] into immutable [`FieldSpec`]s.
//! Matching produces [`BoundField`]s over grid columns holding [`CellValue`]s.

pub mod cell;
pub mod error;
pub mod field;
pub mod grid;
pub mod normalizer;
pub mod spec;

pub use cell::CellValue;
pub use error::{MatchError, Result};
pub use field::{BoundField, MultiField, SingleField};
pub use grid::{Grid, MemoryGrid};
pub use normalizer::{CellNormalizer, Normalizer};
pub use spec::{
    DEFAULT_CASE_SENSITIVE, DEFAULT_MIN_RATIO, DEFAULT_MODE, FieldInput, FieldPattern, FieldSpec,
    MatchMode, TableDefaults, resolve_setting, validate_ratio,
};
