//! Per-mode scoring of specs against header cells and whole rows.
//!
//! Scores are ratios in `[0, 1]`. `Exact` and `Contains` hits score 1.0;
//! `Approx` scores the similarity ratio of the best term. A score of 0.0
//! means no match.

use ftab_model::{FieldSpec, MatchMode};

use crate::render::quote_cell;
use crate::similarity::best_match;

/// Scores `spec` against a single header cell.
///
/// `Approx` ratios below the spec's `min_ratio` score 0.0.
pub fn column_ratio(spec: &FieldSpec, header: &str) -> f64 {
    let header = spec.fold(header);
    match spec.mode() {
        MatchMode::Exact => hit(spec.search_terms().iter().any(|term| **term == *header)),
        MatchMode::Contains => hit(
            spec.search_terms()
                .iter()
                .any(|term| header.contains(&**term)),
        ),
        MatchMode::Approx => best_match(
            spec.search_terms(),
            &header,
            spec.min_ratio(),
            // already folded
            true,
        ),
    }
}

/// Scores a rendered row against every spec and averages the results.
///
/// `Exact` looks for a term as a whole quoted cell, `Contains` for a term
/// anywhere in the row, and `Approx` takes the best similarity of any term
/// to the whole row with no threshold. An empty spec list scores 0.0.
pub fn row_ratio(specs: &[FieldSpec], rendered: &str) -> f64 {
    if specs.is_empty() {
        return 0.0;
    }
    let total: f64 = specs.iter().map(|spec| spec_row_ratio(spec, rendered)).sum();
    total / specs.len() as f64
}

fn spec_row_ratio(spec: &FieldSpec, rendered: &str) -> f64 {
    let row = spec.fold(rendered);
    match spec.mode() {
        MatchMode::Exact => hit(
            spec.search_terms()
                .iter()
                .any(|term| row.contains(&quote_cell(term))),
        ),
        MatchMode::Contains => hit(
            spec.search_terms()
                .iter()
                .any(|term| row.contains(&**term)),
        ),
        MatchMode::Approx => best_match(spec.search_terms(), &row, 0.0, true),
    }
}

fn hit(matched: bool) -> f64 {
    if matched { 1.0 } else { 0.0 }
}
