//! Cell normalization capability.

use std::fmt;
use std::sync::Arc;

use crate::cell::CellValue;

/// Coerces a raw cell value into a typed value.
///
/// Implementations must be pure and total: unparseable input yields a
/// defined default rather than an error.
pub trait CellNormalizer: Send + Sync {
    fn normalize(&self, value: &CellValue) -> CellValue;
}

impl<F> CellNormalizer for F
where
    F: Fn(&CellValue) -> CellValue + Send + Sync,
{
    fn normalize(&self, value: &CellValue) -> CellValue {
        self(value)
    }
}

/// Shared handle to a normalizer, attached to patterns and bound fields.
#[derive(Clone)]
pub struct Normalizer(Arc<dyn CellNormalizer>);

impl Normalizer {
    pub fn new(normalizer: impl CellNormalizer + 'static) -> Self {
        Self(Arc::new(normalizer))
    }

    pub fn apply(&self, value: &CellValue) -> CellValue {
        self.0.normalize(value)
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Normalizer(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_normalizers() {
        let upper = Normalizer::new(|value: &CellValue| {
            CellValue::text(value.as_text().to_uppercase())
        });
        assert_eq!(
            upper.apply(&CellValue::text("rose")),
            CellValue::text("ROSE")
        );
    }
}
