//! Field-to-column matching.
//!
//! Every (spec, column) pair is scored once, then pairs are committed
//! greedily from the highest ratio down. A column is claimed by at most one
//! spec; a spec stops taking columns after its first unless it is
//! multi-column.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use ftab_model::{CellValue, FieldSpec};
use serde::Serialize;
use tracing::trace;

use crate::score::column_ratio;

/// A non-blank cell of the header row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateColumn {
    /// 1-indexed grid column.
    pub column: usize,
    pub header: String,
}

/// A scored (spec, column) pair with a nonzero ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScore {
    /// Index of the spec in declaration order.
    pub spec: usize,
    /// Index into the candidate column list.
    pub candidate: usize,
    /// 1-indexed grid column.
    pub column: usize,
    pub ratio: f64,
}

/// Candidate columns of a header row, skipping blank cells.
pub fn candidate_columns(row: &[CellValue]) -> Vec<CandidateColumn> {
    row.iter()
        .enumerate()
        .filter(|(_, cell)| !cell.is_blank())
        .map(|(index, cell)| CandidateColumn {
            column: index + 1,
            header: cell.as_text(),
        })
        .collect()
}

/// Scores every (spec, column) pair, keeping only nonzero ratios.
pub fn score_pairs(specs: &[FieldSpec], columns: &[CandidateColumn]) -> Vec<MatchScore> {
    let mut pairs = Vec::new();
    for (spec_index, spec) in specs.iter().enumerate() {
        for (candidate, column) in columns.iter().enumerate() {
            let ratio = column_ratio(spec, &column.header);
            if ratio > 0.0 {
                pairs.push(MatchScore {
                    spec: spec_index,
                    candidate,
                    column: column.column,
                    ratio,
                });
            }
        }
    }
    pairs
}

/// Assigns columns to specs.
///
/// Pairs are taken by descending ratio; equal ratios prefer the lower
/// column, then the earlier spec. Returns the committed pairs in commit
/// order.
pub fn match_fields(specs: &[FieldSpec], columns: &[CandidateColumn]) -> Vec<MatchScore> {
    let mut pairs = score_pairs(specs, columns);
    pairs.sort_by(|a, b| {
        b.ratio
            .partial_cmp(&a.ratio)
            .unwrap_or(Ordering::Equal)
            .then(a.column.cmp(&b.column))
            .then(a.spec.cmp(&b.spec))
    });

    let mut claimed_columns = BTreeSet::new();
    let mut fulfilled_specs = BTreeSet::new();
    let mut committed = Vec::new();

    for pair in pairs {
        if claimed_columns.contains(&pair.column) || fulfilled_specs.contains(&pair.spec) {
            continue;
        }

        claimed_columns.insert(pair.column);
        if !specs[pair.spec].multi_column() {
            fulfilled_specs.insert(pair.spec);
        }

        trace!(
            field = specs[pair.spec].name(),
            column = pair.column,
            header = %columns[pair.candidate].header,
            ratio = pair.ratio,
            "bound column"
        );
        committed.push(pair);
    }

    committed
}
