//! Table extraction options.

use ftab_map::{HeaderRow, Seek};
use ftab_model::{FieldInput, MatchMode, TableDefaults};

/// How to read a table from a grid.
///
/// ```
/// use ftab_core::TableOptions;
/// use ftab_map::Seek;
///
/// let options = TableOptions::new()
///     .name("people")
///     .fields(["first_name", "last_name"])
///     .header_row_seek(Seek::Default)
///     .missing_fields_error(true);
/// assert_eq!(options.fields.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TableOptions {
    pub name: Option<String>,
    /// Desired fields; empty means every header column.
    pub fields: Vec<FieldInput>,
    pub header: HeaderRow,
    pub defaults: TableDefaults,
    /// Fail with `MissingFields` when a desired field is not bound.
    pub missing_fields_error: bool,
    /// Add a `row` column holding sheet row numbers to every view.
    pub include_row_num: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            name: None,
            fields: Vec::new(),
            header: HeaderRow::default(),
            defaults: TableDefaults::default(),
            missing_fields_error: false,
            include_row_num: true,
        }
    }
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn field(mut self, field: impl Into<FieldInput>) -> Self {
        self.fields.push(field.into());
        self
    }

    #[must_use]
    pub fn fields<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldInput>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn header_row(mut self, row: i64) -> Self {
        self.header.row = Some(row);
        self
    }

    #[must_use]
    pub fn header_row_seek(mut self, seek: Seek) -> Self {
        self.header.seek = seek;
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.defaults.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn min_ratio(mut self, min_ratio: f64) -> Self {
        self.defaults.min_ratio = Some(min_ratio);
        self
    }

    #[must_use]
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.defaults.case_sensitive = Some(case_sensitive);
        self
    }

    #[must_use]
    pub fn missing_fields_error(mut self, enabled: bool) -> Self {
        self.missing_fields_error = enabled;
        self
    }

    #[must_use]
    pub fn include_row_num(mut self, enabled: bool) -> Self {
        self.include_row_num = enabled;
        self
    }
}
