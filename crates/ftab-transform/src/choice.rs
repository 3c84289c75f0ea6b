//! Normalizers that map free text onto a fixed set of choices.

use ftab_model::{CellNormalizer, CellValue};

use crate::text::Text;

/// One allowed value and the substrings that select it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub criteria: Vec<String>,
}

impl Choice {
    /// A choice matched by its own value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            criteria: vec![value.clone()],
            value,
        }
    }

    /// A choice matched by `criteria`, and by its own value when
    /// `match_value` is set.
    pub fn with_criteria<I, S>(value: impl Into<String>, criteria: I, match_value: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let value = value.into();
        let mut criteria: Vec<String> = criteria.into_iter().map(Into::into).collect();
        if match_value {
            criteria.push(value.clone());
        }
        Self { value, criteria }
    }
}

/// The first choice with a criterion contained in the cell text.
///
/// Matching ignores case. Cells matching no choice become `default`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringChoice {
    choices: Vec<Choice>,
    default: Option<String>,
}

impl StringChoice {
    pub fn new<I>(choices: I) -> Self
    where
        I: IntoIterator<Item = Choice>,
    {
        Self {
            choices: choices
                .into_iter()
                .map(|choice| Choice {
                    criteria: choice.criteria.iter().map(|c| c.to_lowercase()).collect(),
                    value: choice.value,
                })
                .collect(),
            default: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

impl CellNormalizer for StringChoice {
    fn normalize(&self, value: &CellValue) -> CellValue {
        let text = Text::default().to_text(value).to_lowercase();
        self.choices
            .iter()
            .find(|choice| choice.criteria.iter().any(|c| text.contains(c.as_str())))
            .map(|choice| choice.value.clone())
            .or_else(|| self.default.clone())
            .map_or(CellValue::Empty, CellValue::Text)
    }
}

/// Every choice found in the cell text, in choice order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringChoiceMulti {
    choices: Vec<String>,
    case_sensitive: bool,
}

impl StringChoiceMulti {
    pub fn new<I, S>(choices: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            case_sensitive,
        }
    }

    fn fold(&self, text: &str) -> String {
        if self.case_sensitive {
            text.to_string()
        } else {
            text.to_lowercase()
        }
    }
}

impl CellNormalizer for StringChoiceMulti {
    fn normalize(&self, value: &CellValue) -> CellValue {
        let text = self.fold(&Text::default().to_text(value));
        CellValue::List(
            self.choices
                .iter()
                .filter(|choice| text.contains(self.fold(choice).as_str()))
                .map(|choice| CellValue::Text(choice.clone()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> StringChoice {
        StringChoice::new([
            Choice::with_criteria("warm", ["red", "orange"], false),
            Choice::new("Blue"),
        ])
    }

    #[test]
    fn first_matching_choice_wins() {
        let normalizer = colors();
        assert_eq!(
            normalizer.normalize(&CellValue::text("Dark RED, blue")),
            CellValue::text("warm")
        );
        assert_eq!(normalizer.normalize(&CellValue::text("navy blue")), CellValue::text("Blue"));
    }

    #[test]
    fn unmatched_uses_default() {
        assert_eq!(colors().normalize(&CellValue::text("green")), CellValue::Empty);
        assert_eq!(
            colors().with_default("other").normalize(&CellValue::text("green")),
            CellValue::text("other")
        );
    }

    #[test]
    fn criteria_can_exclude_value() {
        let normalizer = StringChoice::new([Choice::with_criteria("yes", ["y"], false)]);
        assert_eq!(normalizer.normalize(&CellValue::text("Y")), CellValue::text("yes"));
        let with_value = Choice::with_criteria("yes", ["y"], true);
        assert_eq!(with_value.criteria, vec!["y".to_string(), "yes".to_string()]);
    }

    #[test]
    fn multi_collects_every_choice() {
        let warm = StringChoiceMulti::new(["red", "pink", "brown", "yellow"], false);
        assert_eq!(
            warm.normalize(&CellValue::text("Red, Brown and yellow")),
            CellValue::List(vec![
                CellValue::text("red"),
                CellValue::text("brown"),
                CellValue::text("yellow"),
            ])
        );
        assert_eq!(warm.normalize(&CellValue::Empty), CellValue::List(vec![]));
    }

    #[test]
    fn multi_case_sensitive() {
        let warm = StringChoiceMulti::new(["red"], true);
        assert_eq!(warm.normalize(&CellValue::text("Red")), CellValue::List(vec![]));
    }
}
