//! Bound-field assembly from committed matches.

use std::collections::BTreeMap;

use ftab_model::{BoundField, FieldSpec, MultiField, SingleField};

use crate::engine::{CandidateColumn, MatchScore};

/// Groups committed pairs into bound fields, ordered by first column.
///
/// Multi-column specs always produce a [`BoundField::Multi`], even with a
/// single member; its ratio is the weakest member's. Specs without a
/// committed pair produce nothing.
pub fn assemble(
    specs: &[FieldSpec],
    columns: &[CandidateColumn],
    committed: &[MatchScore],
) -> Vec<BoundField> {
    let mut by_spec: BTreeMap<usize, Vec<&MatchScore>> = BTreeMap::new();
    for pair in committed {
        by_spec.entry(pair.spec).or_default().push(pair);
    }

    let mut fields: Vec<BoundField> = by_spec
        .into_iter()
        .filter_map(|(spec_index, mut pairs)| {
            let spec = &specs[spec_index];
            pairs.sort_by_key(|pair| pair.column);
            if spec.multi_column() {
                Some(BoundField::Multi(MultiField {
                    name: spec.name().to_string(),
                    headers: pairs
                        .iter()
                        .map(|pair| columns[pair.candidate].header.clone())
                        .collect(),
                    columns: pairs.iter().map(|pair| pair.column).collect(),
                    ratio: pairs.iter().map(|pair| pair.ratio).fold(1.0, f64::min),
                    normalizer: spec.normalizer().cloned(),
                }))
            } else {
                let pair = pairs.first()?;
                Some(BoundField::Single(SingleField {
                    name: spec.name().to_string(),
                    header: columns[pair.candidate].header.clone(),
                    column: pair.column,
                    ratio: pair.ratio,
                    normalizer: spec.normalizer().cloned(),
                }))
            }
        })
        .collect();

    fields.sort_by_key(BoundField::first_column);
    fields
}

/// One single field per candidate column, named after its header.
///
/// Used when no specs are given; no scoring happens, so the ratio is 0.0.
pub fn bare_fields(columns: &[CandidateColumn]) -> Vec<BoundField> {
    columns
        .iter()
        .map(|candidate| {
            BoundField::Single(SingleField {
                name: candidate.header.clone(),
                header: candidate.header.clone(),
                column: candidate.column,
                ratio: 0.0,
                normalizer: None,
            })
        })
        .collect()
}
