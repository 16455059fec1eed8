//! Form staging for a rejection before it is submitted.
//!
//! A [`Draft`] is edited one field at a time and only checked when it is
//! about to be submitted. [`validate`] is the single rule for "can this be
//! submitted": the presentation layer calls it (through [`is_submittable`])
//! to enable its submit control, and the upload store calls it again before
//! mutating anything.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::difficulty::Difficulty;
use crate::error::ValidationError;

/// In-progress rejection form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
}

/// Names of the draft fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Title,
    Description,
    Category,
    Difficulty,
}

impl FieldName {
    /// Text fields that must be non-empty, in the order they are checked.
    pub const REQUIRED: [FieldName; 3] = [FieldName::Title, FieldName::Description, FieldName::Category];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Title => "title",
            FieldName::Description => "description",
            FieldName::Category => "category",
            FieldName::Difficulty => "difficulty",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(FieldName::Title),
            "description" => Ok(FieldName::Description),
            "category" => Ok(FieldName::Category),
            "difficulty" => Ok(FieldName::Difficulty),
            _ => Err(ValidationError::UnknownField(s.to_string())),
        }
    }
}

/// A single typed field update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    Title(String),
    Description(String),
    Category(String),
    Difficulty(Difficulty),
}

impl DraftField {
    /// Build an update from a field name and raw text.
    ///
    /// Text fields take the value as-is; difficulty must parse.
    pub fn parse(name: &str, value: &str) -> Result<Self, ValidationError> {
        let field = match name.parse::<FieldName>()? {
            FieldName::Title => DraftField::Title(value.to_string()),
            FieldName::Description => DraftField::Description(value.to_string()),
            FieldName::Category => DraftField::Category(value.to_string()),
            FieldName::Difficulty => DraftField::Difficulty(value.parse()?),
        };
        Ok(field)
    }

    pub fn name(&self) -> FieldName {
        match self {
            DraftField::Title(_) => FieldName::Title,
            DraftField::Description(_) => FieldName::Description,
            DraftField::Category(_) => FieldName::Category,
            DraftField::Difficulty(_) => FieldName::Difficulty,
        }
    }
}

/// How text fields are judged empty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Whitespace-only text counts as empty.
    #[default]
    Trimmed,
    /// Only the empty string counts as empty.
    Exact,
}

impl ValidationPolicy {
    fn is_blank(&self, value: &str) -> bool {
        match self {
            ValidationPolicy::Trimmed => value.trim().is_empty(),
            ValidationPolicy::Exact => value.is_empty(),
        }
    }
}

impl Draft {
    fn text(&self, field: FieldName) -> &str {
        match field {
            FieldName::Title => &self.title,
            FieldName::Description => &self.description,
            FieldName::Category => &self.category,
            FieldName::Difficulty => self.difficulty.as_str(),
        }
    }
}

/// Return a copy of `draft` with one field replaced. No validation.
pub fn update_field(draft: &Draft, field: DraftField) -> Draft {
    let mut next = draft.clone();
    match field {
        DraftField::Title(v) => next.title = v,
        DraftField::Description(v) => next.description = v,
        DraftField::Category(v) => next.category = v,
        DraftField::Difficulty(d) => next.difficulty = d,
    }
    next
}

/// The empty form: blank text and Medium difficulty.
pub fn reset() -> Draft {
    Draft::default()
}

/// Check that title, description and category are filled in.
///
/// Reports the first missing field in form order.
pub fn validate(draft: &Draft, policy: ValidationPolicy) -> Result<(), ValidationError> {
    match FieldName::REQUIRED
        .into_iter()
        .find(|&field| policy.is_blank(draft.text(field)))
    {
        Some(field) => Err(ValidationError::MissingField { field }),
        None => Ok(()),
    }
}

/// Whether the submit control should be enabled.
pub fn is_submittable(draft: &Draft, policy: ValidationPolicy) -> bool {
    validate(draft, policy).is_ok()
}
