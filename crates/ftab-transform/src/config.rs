//! Serializable normalizer selection.

use chrono::NaiveDateTime;
use ftab_model::Normalizer;
use serde::{Deserialize, Serialize};

use crate::choice::{Choice, StringChoice, StringChoiceMulti};
use crate::datetime::Date;
use crate::numeric::{Float, Integer, IntegerList};
use crate::text::{Boolean, Digit, Text, WordList};

/// A choice entry: a bare value, or a value with its match criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceConfig {
    Value(String),
    Criteria {
        value: String,
        matches: Vec<String>,
    },
}

/// Normalizer settings as written in configuration files.
///
/// ```toml
/// normalizer = { kind = "integer", default = 0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizerConfig {
    Text {
        #[serde(default)]
        default: String,
    },
    IntegerList,
    Integer {
        #[serde(default)]
        default: Option<i64>,
    },
    Float {
        #[serde(default)]
        default: Option<f64>,
    },
    Digit,
    WordList,
    Boolean,
    Date {
        #[serde(default)]
        default: Option<NaiveDateTime>,
    },
    StringChoice {
        choices: Vec<ChoiceConfig>,
        /// Also match a criteria entry by its own value.
        #[serde(default = "default_true")]
        match_value: bool,
        #[serde(default)]
        default: Option<String>,
    },
    StringChoiceMulti {
        choices: Vec<String>,
        #[serde(default = "default_true")]
        case_sensitive: bool,
    },
}

fn default_true() -> bool {
    true
}

impl NormalizerConfig {
    pub fn build(&self) -> Normalizer {
        match self {
            Self::Text { default } => Normalizer::new(Text::with_default(default.clone())),
            Self::IntegerList => Normalizer::new(IntegerList),
            Self::Integer { default } => Normalizer::new(Integer { default: *default }),
            Self::Float { default } => Normalizer::new(Float { default: *default }),
            Self::Digit => Normalizer::new(Digit),
            Self::WordList => Normalizer::new(WordList),
            Self::Boolean => Normalizer::new(Boolean),
            Self::Date { default } => Normalizer::new(Date { default: *default }),
            Self::StringChoice {
                choices,
                match_value,
                default,
            } => {
                let choices = choices.iter().map(|choice| match choice {
                    ChoiceConfig::Value(value) => Choice::new(value.clone()),
                    ChoiceConfig::Criteria { value, matches } => {
                        Choice::with_criteria(value.clone(), matches.iter().cloned(), *match_value)
                    }
                });
                let mut normalizer = StringChoice::new(choices);
                if let Some(default) = default {
                    normalizer = normalizer.with_default(default.clone());
                }
                Normalizer::new(normalizer)
            }
            Self::StringChoiceMulti {
                choices,
                case_sensitive,
            } => Normalizer::new(StringChoiceMulti::new(choices.iter().cloned(), *case_sensitive)),
        }
    }
}
