//! Header row resolution.
//!
//! The header row is either fixed by the caller or found by scanning the
//! first rows of the grid and keeping the one that best fits the specs.

use std::fmt;
use std::str::FromStr;

use ftab_model::{FieldSpec, Grid, MatchError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::render::render_row;
use crate::score::row_ratio;

/// Rows scanned when seeking without an explicit bound.
pub const DEFAULT_SEEK_ROWS: usize = 20;

/// Whether, and how far, to search for the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seek {
    /// Use the fixed header row.
    #[default]
    Off,
    /// Scan the first [`DEFAULT_SEEK_ROWS`] rows.
    Default,
    /// Scan the first `n` rows. Only positive bounds are valid.
    Rows(i64),
}

impl Seek {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Number of rows to scan, or `None` when seeking is off.
    ///
    /// # Errors
    ///
    /// `InvalidSeek` for a bound below 1.
    pub fn bound(&self) -> Result<Option<usize>> {
        match *self {
            Self::Off => Ok(None),
            Self::Default => Ok(Some(DEFAULT_SEEK_ROWS)),
            Self::Rows(n) => usize::try_from(n)
                .ok()
                .filter(|&rows| rows > 0)
                .map(Some)
                .ok_or_else(|| MatchError::InvalidSeek {
                    value: n.to_string(),
                }),
        }
    }
}

impl From<bool> for Seek {
    fn from(value: bool) -> Self {
        if value { Self::Default } else { Self::Off }
    }
}

impl fmt::Display for Seek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("false"),
            Self::Default => f.write_str("true"),
            Self::Rows(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for Seek {
    type Err = MatchError;

    /// Parses `true`, `false`, or a positive row count.
    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let seek = match token.to_ascii_lowercase().as_str() {
            "true" => Self::Default,
            "false" => Self::Off,
            _ => token
                .parse::<i64>()
                .map(Self::Rows)
                .map_err(|_| MatchError::InvalidSeek {
                    value: s.to_string(),
                })?,
        };
        seek.bound()?;
        Ok(seek)
    }
}

/// Header row selection: a fixed row, or a seek that overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeaderRow {
    /// Fixed header row (1-indexed). Defaults to the first row.
    pub row: Option<i64>,
    pub seek: Seek,
}

impl HeaderRow {
    pub fn fixed(row: i64) -> Self {
        Self {
            row: Some(row),
            seek: Seek::Off,
        }
    }

    pub fn seek(seek: Seek) -> Self {
        Self { row: None, seek }
    }
}

/// Resolves the header row number and its fit ratio.
///
/// With a fixed row, the ratio is informational only. When seeking, the
/// row with the strictly greatest ratio wins and ties keep the earliest
/// row; a bound past the end of the grid scans only the rows present.
///
/// # Errors
///
/// - `InvalidRow` for a fixed row outside the grid, or an empty grid.
/// - `InvalidField` when seeking without any searchable spec.
/// - `InvalidSeek` for a non-positive seek bound.
pub fn resolve_header_row<G>(grid: &G, specs: &[FieldSpec], header: &HeaderRow) -> Result<(usize, f64)>
where
    G: Grid + ?Sized,
{
    let available = grid.row_count();
    if !header.seek.is_enabled() {
        return fixed_header_row(grid, specs, header.row.unwrap_or(1));
    }
    if !specs.iter().any(FieldSpec::is_searchable) {
        return Err(MatchError::invalid_field(
            "seeking a header row requires at least one field with search terms",
        ));
    }
    let bound = header.seek.bound()?.unwrap_or(DEFAULT_SEEK_ROWS);

    let mut best: Option<(usize, f64)> = None;
    for number in 1..=bound.min(available) {
        let rendered = render_row(grid.row(number).unwrap_or_default());
        let ratio = row_ratio(specs, &rendered);
        debug!(row = number, ratio, "scored header row candidate");
        if best.is_none_or(|(_, top)| ratio > top) {
            best = Some((number, ratio));
        }
    }

    let (number, ratio) = best.ok_or(MatchError::InvalidRow { row: 1, available })?;
    debug!(row = number, ratio, scanned = bound.min(available), "selected header row");
    Ok((number, ratio))
}

fn fixed_header_row<G>(grid: &G, specs: &[FieldSpec], row: i64) -> Result<(usize, f64)>
where
    G: Grid + ?Sized,
{
    let available = grid.row_count();
    let number = usize::try_from(row)
        .ok()
        .filter(|&n| n >= 1 && n <= available)
        .ok_or(MatchError::InvalidRow { row, available })?;
    let ratio = row_ratio(specs, &render_row(grid.row(number).unwrap_or_default()));
    debug!(row = number, ratio, "using fixed header row");
    Ok((number, ratio))
}
