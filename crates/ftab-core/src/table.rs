//! Extracted table and its views.

use std::path::PathBuf;

use ftab_model::{BoundField, CellValue};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// Name of the synthetic column holding sheet row numbers.
pub const ROW_FIELD: &str = "row";

/// Where a table came from and how its header was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetSummary {
    pub path: Option<PathBuf>,
    pub sheet_name: Option<String>,
    /// 1-indexed header row.
    pub header_row: usize,
    pub header_ratio: f64,
    /// Rows in the sheet, header and preamble included.
    pub row_count: usize,
}

/// A bound field with its column data.
#[derive(Debug, Clone)]
pub struct TableField {
    pub field: BoundField,
    /// One value per data row.
    pub data: Vec<CellValue>,
}

impl TableField {
    pub fn name(&self) -> &str {
        self.field.name()
    }
}

/// Extracted table, viewed as an ordered map of field name to column data.
///
/// Fields are ordered by column. When two fields share a name, lookups and
/// views see the first one only.
#[derive(Debug, Clone)]
pub struct Table {
    pub(crate) name: Option<String>,
    pub(crate) fields: Vec<TableField>,
    pub(crate) missing: Vec<String>,
    pub(crate) row_numbers: Vec<CellValue>,
    pub(crate) sheet: SheetSummary,
    pub(crate) include_row_num: bool,
}

impl Table {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn sheet(&self) -> &SheetSummary {
        &self.sheet
    }

    /// Bound fields with their data, in column order.
    pub fn fields(&self) -> &[TableField] {
        &self.fields
    }

    /// Requested fields that bound no column, once per unbound spec, in
    /// declaration order.
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Drops or restores the synthetic `row` column in every view.
    pub fn set_include_row_num(&mut self, enabled: bool) {
        self.include_row_num = enabled;
    }

    pub fn include_row_num(&self) -> bool {
        self.include_row_num
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.row_numbers.len()
    }

    /// Column data for `name`.
    pub fn get(&self, name: &str) -> Option<&[CellValue]> {
        self.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, data)| data)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// `(name, column data)` pairs, the `row` column last.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CellValue])> {
        let row = self
            .include_row_num
            .then_some((ROW_FIELD, self.row_numbers.as_slice()));
        let mut columns: Vec<(&str, &[CellValue])> = Vec::with_capacity(self.fields.len() + 1);
        let candidates = self
            .fields
            .iter()
            .map(|field| (field.name(), field.data.as_slice()))
            .chain(row);
        for (name, data) in candidates {
            if columns.iter().all(|(seen, _)| *seen != name) {
                columns.push((name, data));
            }
        }
        columns.into_iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(name, _)| name)
    }

    pub fn values(&self) -> impl Iterator<Item = &[CellValue]> {
        self.iter().map(|(_, data)| data)
    }

    /// Number of visible columns.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-oriented view.
    pub fn records(&self) -> Records<'_> {
        Records { table: self }
    }
}

/// Sequence of rows, each a [`Record`] mapping field names to values.
#[derive(Debug, Clone, Copy)]
pub struct Records<'a> {
    table: &'a Table,
}

impl<'a> Records<'a> {
    pub fn len(&self) -> usize {
        self.table.row_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record for data row `index` (0-based).
    pub fn get(&self, index: usize) -> Option<Record> {
        if index >= self.len() {
            return None;
        }
        Some(Record {
            values: self
                .table
                .iter()
                .map(|(name, data)| {
                    let value = data.get(index).cloned().unwrap_or_default();
                    (name.to_string(), value)
                })
                .collect(),
        })
    }

    pub fn iter(self) -> impl Iterator<Item = Record> + 'a {
        (0..self.len()).filter_map(move |index| self.get(index))
    }
}

impl Serialize for Records<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// One data row as ordered `(field name, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: Vec<(String, CellValue)>,
}

impl Record {
    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in &self.values {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
