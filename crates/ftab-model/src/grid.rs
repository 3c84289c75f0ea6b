//! Grid source contract.
//!
//! A grid is a 1-indexed sequence of rows of raw cells. Sources open and
//! materialize their rows up front, so reading from a grid cannot fail;
//! file and sheet errors are reported when the source is opened.

use crate::cell::CellValue;

/// Row-oriented access to a sheet's raw cells.
pub trait Grid {
    /// Total number of rows in the sheet.
    fn row_count(&self) -> usize;

    /// Row `number` (1-indexed), or `None` past the end.
    fn row(&self, number: usize) -> Option<&[CellValue]>;

    /// Cell at `row`, `column` (both 1-indexed).
    fn column_at(&self, row: usize, column: usize) -> Option<&CellValue> {
        let index = column.checked_sub(1)?;
        self.row(row)?.get(index)
    }

    /// Widest row length.
    fn column_count(&self) -> usize {
        (1..=self.row_count())
            .filter_map(|n| self.row(n))
            .map(<[CellValue]>::len)
            .max()
            .unwrap_or(0)
    }

    /// Values of `column` from `start_row` to the last row; short rows
    /// yield [`CellValue::Empty`].
    fn column_values(&self, column: usize, start_row: usize) -> Vec<CellValue> {
        (start_row.max(1)..=self.row_count())
            .map(|row| self.column_at(row, column).cloned().unwrap_or_default())
            .collect()
    }
}

/// Grid held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryGrid {
    rows: Vec<Vec<CellValue>>,
}

impl MemoryGrid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Builds a grid of text cells; empty strings become empty cells.
    pub fn from_text<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(CellValue::text).collect())
                .collect(),
        )
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }
}

impl Grid for MemoryGrid {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row(&self, number: usize) -> Option<&[CellValue]> {
        let index = number.checked_sub(1)?;
        self.rows.get(index).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryGrid {
        MemoryGrid::from_text([
            vec!["first_name", "last_name"],
            vec!["Rose", "Tyler"],
            vec!["Amy"],
        ])
    }

    #[test]
    fn rows_are_one_indexed() {
        let grid = sample();
        assert_eq!(grid.row_count(), 3);
        assert!(grid.row(0).is_none());
        assert_eq!(grid.row(1).map(<[CellValue]>::len), Some(2));
        assert!(grid.row(4).is_none());
    }

    #[test]
    fn column_at_handles_short_rows() {
        let grid = sample();
        assert_eq!(grid.column_at(2, 2), Some(&CellValue::text("Tyler")));
        assert_eq!(grid.column_at(3, 2), None);
        assert_eq!(grid.column_at(1, 0), None);
    }

    #[test]
    fn column_values_pad_with_empty() {
        let grid = sample();
        assert_eq!(
            grid.column_values(2, 2),
            vec![CellValue::text("Tyler"), CellValue::Empty]
        );
        assert_eq!(grid.column_count(), 2);
    }
}
