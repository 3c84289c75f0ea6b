//! TOML fields file.
//!
//! ```toml
//! [table]
//! name = "people"
//! mode = "approx"
//! header_row_seek = 20
//!
//! [[field]]
//! name = "first_name"
//! aliases = ["given name"]
//! normalizer = { kind = "text" }
//! ```

use std::path::{Path, PathBuf};

use ftab_core::{FieldPattern, Seek, TableOptions};
use ftab_model::MatchError;
use ftab_transform::NormalizerConfig;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read fields file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fields file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Parsed fields file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldsFile {
    #[serde(default)]
    pub table: TableSection,
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldEntry>,
}

/// `[table]` settings; unset keys keep the library defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableSection {
    pub name: Option<String>,
    pub mode: Option<String>,
    pub min_ratio: Option<f64>,
    pub case_sensitive: Option<bool>,
    pub header_row: Option<i64>,
    pub header_row_seek: Option<SeekSetting>,
    pub missing_fields_error: Option<bool>,
    pub include_row_num: Option<bool>,
}

/// `header_row_seek = true` or `header_row_seek = 15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SeekSetting {
    Flag(bool),
    Rows(i64),
}

impl SeekSetting {
    pub fn to_seek(self) -> Result<Seek, MatchError> {
        let seek = match self {
            Self::Flag(enabled) => Seek::from(enabled),
            Self::Rows(rows) => Seek::Rows(rows),
        };
        seek.bound()?;
        Ok(seek)
    }
}

/// One `[[field]]` entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub mode: Option<String>,
    pub min_ratio: Option<f64>,
    pub case_sensitive: Option<bool>,
    #[serde(default)]
    pub multi_column: bool,
    #[serde(default)]
    pub exclude_name: bool,
    pub normalizer: Option<NormalizerConfig>,
}

impl FieldEntry {
    pub fn to_pattern(&self) -> Result<FieldPattern, MatchError> {
        let mut pattern = FieldPattern::new(&self.name)
            .aliases(self.aliases.iter().cloned())
            .multi_column(self.multi_column)
            .exclude_name(self.exclude_name);
        if let Some(mode) = &self.mode {
            pattern = pattern.mode_token(mode)?;
        }
        if let Some(min_ratio) = self.min_ratio {
            pattern = pattern.min_ratio(min_ratio);
        }
        if let Some(case_sensitive) = self.case_sensitive {
            pattern = pattern.case_sensitive(case_sensitive);
        }
        if let Some(normalizer) = &self.normalizer {
            pattern = pattern.normalizer(normalizer.build());
        }
        Ok(pattern)
    }
}

impl FieldsFile {
    pub fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &contents)
    }

    /// Applies the file on top of `options`.
    ///
    /// Fields from the file come before any already in `options`.
    pub fn apply(&self, mut options: TableOptions) -> Result<TableOptions, MatchError> {
        let table = &self.table;
        if let Some(name) = &table.name {
            options = options.name(name.clone());
        }
        if let Some(mode) = &table.mode {
            options = options.mode(mode.parse()?);
        }
        if let Some(min_ratio) = table.min_ratio {
            options = options.min_ratio(min_ratio);
        }
        if let Some(case_sensitive) = table.case_sensitive {
            options = options.case_sensitive(case_sensitive);
        }
        if let Some(row) = table.header_row {
            options = options.header_row(row);
        }
        if let Some(seek) = table.header_row_seek {
            options = options.header_row_seek(seek.to_seek()?);
        }
        if let Some(strict) = table.missing_fields_error {
            options = options.missing_fields_error(strict);
        }
        if let Some(include) = table.include_row_num {
            options = options.include_row_num(include);
        }

        let patterns = self
            .fields
            .iter()
            .map(FieldEntry::to_pattern)
            .collect::<Result<Vec<_>, _>>()?;
        let existing = std::mem::take(&mut options.fields);
        Ok(options.fields(patterns).fields(existing))
    }
}

/// Loads the fields file at `path` and applies it on top of `options`.
pub fn load_options(path: &Path, options: TableOptions) -> Result<TableOptions, ConfigError> {
    Ok(FieldsFile::load(path)?.apply(options)?)
}

#[cfg(test)]
mod tests {
    use ftab_core::MatchMode;

    use super::*;

    fn parse(contents: &str) -> Result<FieldsFile, ConfigError> {
        FieldsFile::parse(Path::new("fields.toml"), contents)
    }

    #[test]
    fn reads_table_and_fields() {
        let file = parse(
            r#"
            [table]
            name = "people"
            mode = "approx"
            header_row_seek = 15
            missing_fields_error = true

            [[field]]
            name = "first_name"
            aliases = ["given name"]
            min_ratio = 0.7
            normalizer = { kind = "text" }

            [[field]]
            name = "score"
            mode = "contains"
            multi_column = true
            "#,
        )
        .unwrap();

        let options = file.apply(TableOptions::new()).unwrap();

        assert_eq!(options.name.as_deref(), Some("people"));
        assert_eq!(options.defaults.mode, Some(MatchMode::Approx));
        assert_eq!(options.header.seek, Seek::Rows(15));
        assert!(options.missing_fields_error);
        assert_eq!(options.fields.len(), 2);
    }

    #[test]
    fn seek_accepts_booleans() {
        let file = parse("[table]\nheader_row_seek = true\n").unwrap();
        let options = file.apply(TableOptions::new()).unwrap();
        assert_eq!(options.header.seek, Seek::Default);
    }

    #[test]
    fn bad_values_surface_match_errors() {
        let file = parse("[table]\nheader_row_seek = 0\n").unwrap();
        assert!(matches!(
            file.apply(TableOptions::new()),
            Err(MatchError::InvalidSeek { .. })
        ));

        let file = parse("[[field]]\nname = \"a\"\nmode = \"fuzzy\"\n").unwrap();
        assert!(matches!(
            file.apply(TableOptions::new()),
            Err(MatchError::InvalidMode { .. })
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse("[table]\nheader = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn file_fields_precede_existing_ones() {
        let file = parse("[[field]]\nname = \"id\"\n").unwrap();
        let options = file.apply(TableOptions::new().field("total")).unwrap();
        let names: Vec<_> = options
            .fields
            .iter()
            .map(|field| match field {
                ftab_model::FieldInput::Name(name) => name.clone(),
                ftab_model::FieldInput::Pattern(pattern) => pattern.name.clone(),
            })
            .collect();
        assert_eq!(names, vec!["id", "total"]);
    }
}
