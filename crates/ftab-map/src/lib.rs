//! Header row resolution and field-to-column matching.
//!
//! [`resolve`] picks the header row of a [`Grid`] (fixed or by seeking),
//! builds candidate columns from it, and binds each [`FieldSpec`] to one or
//! more columns by greedy global assignment over similarity ratios.

pub mod assembly;
pub mod engine;
pub mod header;
pub mod render;
pub mod score;
pub mod similarity;

use ftab_model::{BoundField, FieldSpec, Grid, Result};
use serde::Serialize;
use tracing::{debug, info_span};

pub use assembly::{assemble, bare_fields};
pub use engine::{CandidateColumn, MatchScore, candidate_columns, match_fields, score_pairs};
pub use header::{DEFAULT_SEEK_ROWS, HeaderRow, Seek, resolve_header_row};
pub use render::{quote_cell, render_row};
pub use score::{column_ratio, row_ratio};
pub use similarity::{best_match, ratio};

/// Outcome of resolving a grid against a set of specs.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// 1-indexed header row.
    pub header_row: usize,
    /// How well the header row fit the specs; diagnostic only.
    pub header_ratio: f64,
    /// Bound fields ordered by first column.
    pub fields: Vec<BoundField>,
    /// Per spec, in declaration order, the index of its field in `fields`.
    /// Empty when no specs were given.
    pub bindings: Vec<Option<usize>>,
}

impl Resolution {
    /// First field named `name`, by column.
    ///
    /// Specs may share a name; use [`Resolution::field_for`] to reach the
    /// field of a particular spec.
    pub fn field(&self, name: &str) -> Option<&BoundField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Field bound by the spec at `spec_index`.
    pub fn field_for(&self, spec_index: usize) -> Option<&BoundField> {
        let index = (*self.bindings.get(spec_index)?)?;
        self.fields.get(index)
    }

    /// Indices of specs that bound nothing, ascending.
    pub fn unmatched(&self) -> impl Iterator<Item = usize> + '_ {
        self.bindings
            .iter()
            .enumerate()
            .filter_map(|(spec_index, binding)| binding.is_none().then_some(spec_index))
    }

    /// Names of `specs` that produced no bound field, in declaration order.
    ///
    /// `specs` must be the slice this resolution was made from. A name
    /// appears once per unbound spec, even when another spec of the same
    /// name did bind.
    pub fn missing<'a>(&self, specs: &'a [FieldSpec]) -> Vec<&'a str> {
        self.unmatched()
            .filter_map(|spec_index| specs.get(spec_index).map(FieldSpec::name))
            .collect()
    }
}

/// Resolves the header row and binds fields to columns.
///
/// An empty `specs` slice binds every non-blank header column under its own
/// name.
///
/// # Errors
///
/// Header row errors from [`resolve_header_row`]; matching itself never
/// fails.
pub fn resolve<G>(grid: &G, specs: &[FieldSpec], header: &HeaderRow) -> Result<Resolution>
where
    G: Grid + ?Sized,
{
    let span = info_span!("resolve", specs = specs.len(), rows = grid.row_count());
    let _guard = span.enter();

    let (header_row, header_ratio) = resolve_header_row(grid, specs, header)?;
    let columns = candidate_columns(grid.row(header_row).unwrap_or_default());

    let (fields, bindings) = if specs.is_empty() {
        (bare_fields(&columns), Vec::new())
    } else {
        let committed = match_fields(specs, &columns);
        let fields = assemble(specs, &columns, &committed);
        let bindings = spec_bindings(specs.len(), &committed, &fields);
        (fields, bindings)
    };

    debug!(
        header_row,
        header_ratio,
        candidates = columns.len(),
        bound = fields.len(),
        "resolved table"
    );

    Ok(Resolution {
        header_row,
        header_ratio,
        fields,
        bindings,
    })
}

/// Maps each spec to the field holding its lowest committed column.
///
/// Committed columns are distinct, so a field's first column identifies it.
fn spec_bindings(
    spec_count: usize,
    committed: &[MatchScore],
    fields: &[BoundField],
) -> Vec<Option<usize>> {
    let mut first_columns: Vec<Option<usize>> = vec![None; spec_count];
    for pair in committed {
        if let Some(first) = first_columns.get_mut(pair.spec) {
            *first = Some(first.map_or(pair.column, |column| column.min(pair.column)));
        }
    }
    first_columns
        .into_iter()
        .map(|first| {
            let column = first?;
            fields
                .iter()
                .position(|field| field.first_column() == column)
        })
        .collect()
}
