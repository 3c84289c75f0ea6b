//! Field search specifications.
//!
//! Callers describe the fields they want as [`FieldInput`] values: either a
//! bare name or a [`FieldPattern`] whose matching settings may be left unset.
//! Unset settings fall back to the table-level [`TableDefaults`] and then to
//! hardcoded defaults, resolved once into an immutable [`FieldSpec`].

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};
use crate::normalizer::Normalizer;

/// Default similarity threshold for approximate matching.
pub const DEFAULT_MIN_RATIO: f64 = 0.6;
/// Default matching mode.
pub const DEFAULT_MODE: MatchMode = MatchMode::Exact;
/// Default case sensitivity.
pub const DEFAULT_CASE_SENSITIVE: bool = true;

/// How a field's terms are compared with header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// A term must equal the header text.
    #[default]
    Exact,
    /// A term must be a substring of the header text.
    Contains,
    /// Similarity ratio must reach the field's `min_ratio`.
    Approx,
}

impl MatchMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Contains => "contains",
            Self::Approx => "approx",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "contains" => Ok(Self::Contains),
            "approx" => Ok(Self::Approx),
            _ => Err(MatchError::InvalidMode {
                value: s.to_string(),
            }),
        }
    }
}

/// Validates a similarity threshold: `0.0 < value <= 1.0`.
pub fn validate_ratio(value: f64) -> Result<f64> {
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(MatchError::InvalidThreshold { value })
    }
}

/// Resolves a three-state setting: spec value, then table default, then
/// the hardcoded default.
pub fn resolve_setting<T>(spec_value: Option<T>, table_default: Option<T>, hardcoded: T) -> T {
    spec_value.or(table_default).unwrap_or(hardcoded)
}

/// Table-level defaults for settings a [`FieldPattern`] leaves unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TableDefaults {
    pub mode: Option<MatchMode>,
    pub min_ratio: Option<f64>,
    pub case_sensitive: Option<bool>,
}

impl TableDefaults {
    #[must_use]
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_min_ratio(mut self, min_ratio: f64) -> Self {
        self.min_ratio = Some(min_ratio);
        self
    }

    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }

    /// Checks the table-level threshold, if one was given.
    pub fn validate(&self) -> Result<()> {
        if let Some(ratio) = self.min_ratio {
            validate_ratio(ratio)?;
        }
        Ok(())
    }
}

/// Explicit description of a desired field.
///
/// Settings left as `None` are inherited from [`TableDefaults`].
#[derive(Debug, Clone, Default)]
pub struct FieldPattern {
    pub name: String,
    pub aliases: Vec<String>,
    pub mode: Option<MatchMode>,
    pub min_ratio: Option<f64>,
    pub case_sensitive: Option<bool>,
    pub multi_column: bool,
    /// Search only the aliases, never the name itself.
    pub exclude_name: bool,
    pub normalizer: Option<Normalizer>,
}

impl FieldPattern {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    #[must_use]
    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the mode from a token such as `"approx"`.
    pub fn mode_token(self, token: &str) -> Result<Self> {
        Ok(self.mode(token.parse()?))
    }

    #[must_use]
    pub fn min_ratio(mut self, min_ratio: f64) -> Self {
        self.min_ratio = Some(min_ratio);
        self
    }

    #[must_use]
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }

    #[must_use]
    pub fn multi_column(mut self, multi_column: bool) -> Self {
        self.multi_column = multi_column;
        self
    }

    #[must_use]
    pub fn exclude_name(mut self, exclude_name: bool) -> Self {
        self.exclude_name = exclude_name;
        self
    }

    #[must_use]
    pub fn normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = Some(normalizer);
        self
    }
}

/// Raw caller input for one desired field.
#[derive(Debug, Clone)]
pub enum FieldInput {
    Name(String),
    Pattern(FieldPattern),
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

impl From<FieldPattern> for FieldInput {
    fn from(value: FieldPattern) -> Self {
        Self::Pattern(value)
    }
}

/// Immutable, fully resolved field specification.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    aliases: Vec<String>,
    exclude_name: bool,
    mode: MatchMode,
    min_ratio: f64,
    case_sensitive: bool,
    multi_column: bool,
    normalizer: Option<Normalizer>,
}

impl FieldSpec {
    /// Resolves caller input against table defaults.
    ///
    /// # Errors
    ///
    /// `InvalidField` for an empty name, `InvalidThreshold` for a threshold
    /// outside `(0, 1]` at either level.
    pub fn resolve(input: FieldInput, defaults: &TableDefaults) -> Result<Self> {
        defaults.validate()?;
        let pattern = match input {
            FieldInput::Name(name) => FieldPattern::new(name),
            FieldInput::Pattern(pattern) => pattern,
        };
        if pattern.name.trim().is_empty() {
            return Err(MatchError::invalid_field("field name must not be empty"));
        }
        if let Some(ratio) = pattern.min_ratio {
            validate_ratio(ratio)?;
        }

        Ok(Self {
            mode: resolve_setting(pattern.mode, defaults.mode, DEFAULT_MODE),
            min_ratio: resolve_setting(pattern.min_ratio, defaults.min_ratio, DEFAULT_MIN_RATIO),
            case_sensitive: resolve_setting(
                pattern.case_sensitive,
                defaults.case_sensitive,
                DEFAULT_CASE_SENSITIVE,
            ),
            name: pattern.name,
            aliases: pattern
                .aliases
                .into_iter()
                .filter(|alias| !alias.trim().is_empty())
                .collect(),
            exclude_name: pattern.exclude_name,
            multi_column: pattern.multi_column,
            normalizer: pattern.normalizer,
        })
    }

    /// Resolves every input, failing on the first invalid one.
    pub fn resolve_all<I>(inputs: I, defaults: &TableDefaults) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = FieldInput>,
    {
        inputs
            .into_iter()
            .map(|input| Self::resolve(input, defaults))
            .collect()
    }

    /// Exact, case-sensitive spec for a bare name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            exclude_name: false,
            mode: DEFAULT_MODE,
            min_ratio: DEFAULT_MIN_RATIO,
            case_sensitive: DEFAULT_CASE_SENSITIVE,
            multi_column: false,
            normalizer: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn min_ratio(&self) -> f64 {
        self.min_ratio
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn multi_column(&self) -> bool {
        self.multi_column
    }

    pub fn normalizer(&self) -> Option<&Normalizer> {
        self.normalizer.as_ref()
    }

    /// Search terms in declaration order: the name (unless excluded) then aliases.
    pub fn terms(&self) -> Vec<&str> {
        let name = (!self.exclude_name).then_some(self.name.as_str());
        name.into_iter()
            .chain(self.aliases.iter().map(String::as_str))
            .collect()
    }

    /// Terms folded for comparison according to case sensitivity.
    pub fn search_terms(&self) -> Vec<Cow<'_, str>> {
        self.terms().into_iter().map(|t| self.fold(t)).collect()
    }

    /// Applies this spec's case folding to arbitrary text.
    pub fn fold<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(text.to_lowercase())
        }
    }

    /// A spec with no terms is legal but can never bind.
    pub fn is_searchable(&self) -> bool {
        !self.exclude_name || !self.aliases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_gets_hardcoded_defaults() {
        let spec = FieldSpec::resolve("first_name".into(), &TableDefaults::default()).unwrap();
        assert_eq!(spec.mode(), MatchMode::Exact);
        assert!((spec.min_ratio() - 0.6).abs() < f64::EPSILON);
        assert!(spec.case_sensitive());
        assert!(!spec.multi_column());
        assert_eq!(spec.terms(), vec!["first_name"]);
    }

    #[test]
    fn pattern_overrides_table_defaults() {
        let defaults = TableDefaults::default()
            .with_mode(MatchMode::Approx)
            .with_min_ratio(0.3)
            .with_case_sensitive(false);
        let pattern = FieldPattern::new("last_name")
            .mode(MatchMode::Contains)
            .min_ratio(0.9);
        let spec = FieldSpec::resolve(pattern.into(), &defaults).unwrap();
        assert_eq!(spec.mode(), MatchMode::Contains);
        assert!((spec.min_ratio() - 0.9).abs() < f64::EPSILON);
        assert!(!spec.case_sensitive());
    }

    #[test]
    fn unset_pattern_settings_inherit_table_defaults() {
        let defaults = TableDefaults::default().with_mode(MatchMode::Approx);
        let spec = FieldSpec::resolve(FieldPattern::new("x").into(), &defaults).unwrap();
        assert_eq!(spec.mode(), MatchMode::Approx);
    }

    #[test]
    fn resolve_setting_precedence() {
        assert_eq!(resolve_setting(Some(1), Some(2), 3), 1);
        assert_eq!(resolve_setting(None, Some(2), 3), 2);
        assert_eq!(resolve_setting(None, None, 3), 3);
    }

    #[test]
    fn threshold_bounds() {
        assert!(validate_ratio(1.0).is_ok());
        assert!(validate_ratio(0.01).is_ok());
        assert_eq!(
            validate_ratio(0.0),
            Err(MatchError::InvalidThreshold { value: 0.0 })
        );
        assert!(validate_ratio(1.5).is_err());
        assert!(validate_ratio(f64::NAN).is_err());
    }

    #[test]
    fn invalid_threshold_on_pattern_and_table() {
        let err = FieldSpec::resolve(
            FieldPattern::new("a").min_ratio(2.0).into(),
            &TableDefaults::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MatchError::InvalidThreshold { .. }));

        let defaults = TableDefaults::default().with_min_ratio(-0.5);
        let err = FieldSpec::resolve("a".into(), &defaults).unwrap_err();
        assert!(matches!(err, MatchError::InvalidThreshold { .. }));
    }

    #[test]
    fn mode_tokens() {
        assert_eq!("approx".parse::<MatchMode>().unwrap(), MatchMode::Approx);
        assert_eq!(" Contains ".parse::<MatchMode>().unwrap(), MatchMode::Contains);
        let err = "fuzzy".parse::<MatchMode>().unwrap_err();
        assert_eq!(
            err,
            MatchError::InvalidMode {
                value: "fuzzy".to_string()
            }
        );
        assert!(FieldPattern::new("a").mode_token("nope").is_err());
    }

    #[test]
    fn alias_only_spec_without_aliases_is_not_searchable() {
        let spec = FieldSpec::resolve(
            FieldPattern::new("a").exclude_name(true).into(),
            &TableDefaults::default(),
        )
        .unwrap();
        assert!(spec.terms().is_empty());
        assert!(!spec.is_searchable());
    }

    #[test]
    fn terms_order_and_folding() {
        let spec = FieldSpec::resolve(
            FieldPattern::new("First")
                .aliases(["Given Name", "forename"])
                .case_sensitive(false)
                .into(),
            &TableDefaults::default(),
        )
        .unwrap();
        assert_eq!(spec.terms(), vec!["First", "Given Name", "forename"]);
        let folded: Vec<String> = spec.search_terms().into_iter().map(Cow::into_owned).collect();
        assert_eq!(folded, vec!["first", "given name", "forename"]);
    }

    #[test]
    fn empty_name_is_invalid_field() {
        let err = FieldSpec::resolve("  ".into(), &TableDefaults::default()).unwrap_err();
        assert!(matches!(err, MatchError::InvalidField { .. }));
    }
}
