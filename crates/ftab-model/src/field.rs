//! Resolved field-to-column bindings.

use serde::Serialize;

use crate::normalizer::Normalizer;

/// A field bound to exactly one grid column.
#[derive(Debug, Clone, Serialize)]
pub struct SingleField {
    pub name: String,
    pub header: String,
    /// 1-indexed grid column.
    pub column: usize,
    pub ratio: f64,
    #[serde(skip)]
    pub normalizer: Option<Normalizer>,
}

/// A field aggregating several columns that all satisfied one spec.
#[derive(Debug, Clone, Serialize)]
pub struct MultiField {
    pub name: String,
    /// Member header texts, ordered by column number.
    pub headers: Vec<String>,
    /// Member columns, ascending.
    pub columns: Vec<usize>,
    /// Weakest member ratio.
    pub ratio: f64,
    #[serde(skip)]
    pub normalizer: Option<Normalizer>,
}

/// The resolved binding of a spec (or a bare column) to grid columns.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundField {
    Single(SingleField),
    Multi(MultiField),
}

impl BoundField {
    pub fn name(&self) -> &str {
        match self {
            Self::Single(field) => &field.name,
            Self::Multi(field) => &field.name,
        }
    }

    pub fn headers(&self) -> Vec<&str> {
        match self {
            Self::Single(field) => vec![field.header.as_str()],
            Self::Multi(field) => field.headers.iter().map(String::as_str).collect(),
        }
    }

    pub fn columns(&self) -> &[usize] {
        match self {
            Self::Single(field) => std::slice::from_ref(&field.column),
            Self::Multi(field) => &field.columns,
        }
    }

    pub fn first_column(&self) -> usize {
        self.columns().first().copied().unwrap_or_default()
    }

    pub fn ratio(&self) -> f64 {
        match self {
            Self::Single(field) => field.ratio,
            Self::Multi(field) => field.ratio,
        }
    }

    pub fn normalizer(&self) -> Option<&Normalizer> {
        match self {
            Self::Single(field) => field.normalizer.as_ref(),
            Self::Multi(field) => field.normalizer.as_ref(),
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Multi(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_accessors() {
        let field = BoundField::Multi(MultiField {
            name: "name".to_string(),
            headers: vec!["name 2".to_string(), "name 1".to_string()],
            columns: vec![2, 3],
            ratio: 0.8,
            normalizer: None,
        });
        assert_eq!(field.headers(), vec!["name 2", "name 1"]);
        assert_eq!(field.columns(), &[2, 3]);
        assert_eq!(field.first_column(), 2);
        assert!(field.is_multi());
    }

    #[test]
    fn single_serializes_with_kind() {
        let field = BoundField::Single(SingleField {
            name: "id".to_string(),
            header: "ID".to_string(),
            column: 1,
            ratio: 1.0,
            normalizer: None,
        });
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["kind"], "single");
        assert_eq!(json["column"], 1);
        assert!(json.get("normalizer").is_none());
    }
}
