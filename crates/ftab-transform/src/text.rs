//! Text-shaped normalizers.

use std::sync::LazyLock;

use ftab_model::{CellNormalizer, CellValue};
use regex::Regex;

static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]+").expect("Invalid word regex"));

/// Trimmed text of a cell; empty cells become `default`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    pub default: String,
}

impl Text {
    pub fn with_default(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
        }
    }

    pub(crate) fn to_text(&self, value: &CellValue) -> String {
        match value {
            CellValue::Empty => self.default.clone(),
            other => other.as_text().trim().to_string(),
        }
    }
}

impl CellNormalizer for Text {
    fn normalize(&self, value: &CellValue) -> CellValue {
        CellValue::Text(self.to_text(value))
    }
}

/// Runs of ASCII letters, dropping digits and punctuation.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordList;

impl CellNormalizer for WordList {
    fn normalize(&self, value: &CellValue) -> CellValue {
        let text = Text::default().to_text(value);
        CellValue::List(
            WORD_REGEX
                .find_iter(&text)
                .map(|word| CellValue::Text(word.as_str().to_string()))
                .collect(),
        )
    }
}

/// First decimal digit in the cell text, or empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct Digit;

impl CellNormalizer for Digit {
    fn normalize(&self, value: &CellValue) -> CellValue {
        Text::default()
            .to_text(value)
            .chars()
            .find_map(|ch| ch.to_digit(10))
            .map_or(CellValue::Empty, |digit| CellValue::Int(i64::from(digit)))
    }
}

/// Truthiness of a cell.
///
/// Empty cells, empty text, zero, `false` and empty lists are false;
/// everything else is true.
#[derive(Debug, Clone, Copy, Default)]
pub struct Boolean;

impl CellNormalizer for Boolean {
    fn normalize(&self, value: &CellValue) -> CellValue {
        let truthy = match value {
            CellValue::Empty => false,
            CellValue::Text(s) => !s.is_empty(),
            CellValue::Int(i) => *i != 0,
            CellValue::Float(f) => *f != 0.0,
            CellValue::Bool(b) => *b,
            CellValue::DateTime(_) => true,
            CellValue::List(items) => !items.is_empty(),
        };
        CellValue::Bool(truthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_trims_and_defaults() {
        assert_eq!(
            Text::default().normalize(&CellValue::text("  Rose ")),
            CellValue::Text("Rose".to_string())
        );
        assert_eq!(
            Text::with_default("n/a").normalize(&CellValue::Empty),
            CellValue::Text("n/a".to_string())
        );
        assert_eq!(
            Text::default().normalize(&CellValue::Float(3.0)),
            CellValue::Text("3".to_string())
        );
    }

    #[test]
    fn word_list_drops_digits_and_punctuation() {
        let words = WordList.normalize(&CellValue::text("red, pink & 2 browns"));
        assert_eq!(
            words,
            CellValue::List(vec![
                CellValue::text("red"),
                CellValue::text("pink"),
                CellValue::text("browns"),
            ])
        );
        assert_eq!(WordList.normalize(&CellValue::Empty), CellValue::List(vec![]));
    }

    #[test]
    fn digit_takes_first() {
        assert_eq!(Digit.normalize(&CellValue::text("grade 4 of 5")), CellValue::Int(4));
        assert_eq!(Digit.normalize(&CellValue::Int(72)), CellValue::Int(7));
        assert_eq!(Digit.normalize(&CellValue::text("none")), CellValue::Empty);
    }

    #[test]
    fn boolean_truthiness() {
        let falsy = [
            CellValue::Empty,
            CellValue::Int(0),
            CellValue::Float(0.0),
            CellValue::Bool(false),
            CellValue::List(vec![]),
        ];
        for value in falsy {
            assert_eq!(Boolean.normalize(&value), CellValue::Bool(false), "{value:?}");
        }
        assert_eq!(Boolean.normalize(&CellValue::text("no")), CellValue::Bool(true));
        assert_eq!(Boolean.normalize(&CellValue::Int(-1)), CellValue::Bool(true));
    }
}
