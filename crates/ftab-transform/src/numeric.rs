//! Numeric normalizers.
//!
//! Text is first parsed as a number; failing that, the first run of digits
//! is used. Fractions are truncated toward zero for integer targets.

use std::sync::LazyLock;

use chrono::Datelike;
use ftab_model::{CellNormalizer, CellValue};
use regex::Regex;

static DIGIT_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid digit run regex"));

/// Parses trimmed text as a finite number.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Every run of ASCII digits in `text`, skipping runs too long for `i64`.
pub fn digit_runs(text: &str) -> Vec<i64> {
    DIGIT_RUN_REGEX
        .find_iter(text)
        .filter_map(|run| run.as_str().parse().ok())
        .collect()
}

fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

/// List of integers found in a cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerList;

impl IntegerList {
    fn values(value: &CellValue) -> Vec<i64> {
        match value {
            CellValue::Empty | CellValue::Bool(_) => Vec::new(),
            CellValue::Int(i) => vec![*i],
            CellValue::Float(f) if f.is_finite() => vec![truncate(*f)],
            CellValue::Text(s) => match parse_number(s) {
                Some(n) => vec![truncate(n)],
                None => digit_runs(s),
            },
            other => digit_runs(&other.as_text()),
        }
    }
}

impl CellNormalizer for IntegerList {
    fn normalize(&self, value: &CellValue) -> CellValue {
        CellValue::List(Self::values(value).into_iter().map(CellValue::Int).collect())
    }
}

/// A single integer, or `default` when none can be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Integer {
    pub default: Option<i64>,
}

impl Integer {
    fn value(&self, value: &CellValue) -> Option<i64> {
        match value {
            CellValue::List(items) => items.first().map_or(self.default, |first| self.value(first)),
            CellValue::Empty | CellValue::Bool(_) => self.default,
            CellValue::DateTime(dt) => Some(i64::from(dt.year())),
            other => IntegerList::values(other).first().copied().or(self.default),
        }
    }
}

impl CellNormalizer for Integer {
    fn normalize(&self, value: &CellValue) -> CellValue {
        self.value(value).into()
    }
}

/// A single float, or `default` when none can be read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Float {
    pub default: Option<f64>,
}

impl Float {
    fn value(&self, value: &CellValue) -> Option<f64> {
        match value {
            CellValue::List(items) => items.first().map_or(self.default, |first| self.value(first)),
            CellValue::Empty | CellValue::Bool(_) => self.default,
            CellValue::DateTime(dt) => Some(f64::from(dt.year())),
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            CellValue::Text(s) => parse_number(s)
                .or_else(|| digit_runs(s).first().map(|&n| n as f64))
                .or(self.default),
        }
    }
}

impl CellNormalizer for Float {
    fn normalize(&self, value: &CellValue) -> CellValue {
        self.value(value).into()
    }
}
