//! Field rules: single constraints on a single field.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::ErrorCode;

/// Target kind for a coercion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Free text. Numbers and booleans are stringified.
    Text,
    /// Any finite number. Numeric strings are parsed.
    Number,
    /// A whole number. Numeric strings are parsed.
    Integer,
    /// `true`/`false`, also accepted as strings.
    Boolean,
    /// Ten-digit mobile number, normalized to a string.
    Phone,
    /// Calendar date in `YYYY-MM-DD` form.
    Date,
}

/// The constraint a [`FieldRule`] applies.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// The field must be present and non-blank.
    Required,
    /// Strips surrounding whitespace from text.
    Trim,
    /// Converts the value to the given kind or fails.
    Coerce(ValueKind),
    /// Minimum text length in characters.
    MinLength(usize),
    /// Maximum text length in characters.
    MaxLength(usize),
    /// Text must match the regex.
    Pattern(Regex),
    /// Inclusive numeric lower bound.
    Min(f64),
    /// Inclusive numeric upper bound.
    Max(f64),
    /// Number strictly greater than zero.
    Positive,
    /// Number greater than or equal to zero.
    NonNegative,
    /// Text must equal one of the options.
    OneOf(Vec<String>),
    /// Value must equal another field's value.
    MatchesField(String),
    /// List must have at least this many entries.
    MinItems(usize),
}

impl RuleKind {
    /// Error code reported when this rule fails.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Required => ErrorCode::Required,
            Self::Trim | Self::Coerce(
                ValueKind::Text | ValueKind::Number | ValueKind::Integer | ValueKind::Boolean,
            ) => ErrorCode::InvalidType,
            Self::Coerce(ValueKind::Phone) | Self::Pattern(_) => ErrorCode::Pattern,
            Self::Coerce(ValueKind::Date) => ErrorCode::InvalidDate,
            Self::MinLength(_) | Self::MinItems(_) => ErrorCode::TooShort,
            Self::MaxLength(_) => ErrorCode::TooLong,
            Self::Min(_) | Self::NonNegative => ErrorCode::TooSmall,
            Self::Max(_) => ErrorCode::TooBig,
            Self::Positive => ErrorCode::NotPositive,
            Self::OneOf(_) => ErrorCode::InvalidOption,
            Self::MatchesField(_) => ErrorCode::Mismatch,
        }
    }

    /// Short rule name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Trim => "trim",
            Self::Coerce(_) => "coerce",
            Self::MinLength(_) => "min_length",
            Self::MaxLength(_) => "max_length",
            Self::Pattern(_) => "pattern",
            Self::Min(_) => "min",
            Self::Max(_) => "max",
            Self::Positive => "positive",
            Self::NonNegative => "non_negative",
            Self::OneOf(_) => "one_of",
            Self::MatchesField(_) => "matches_field",
            Self::MinItems(_) => "min_items",
        }
    }
}

/// One constraint on one field, with the message shown when it fails.
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// What the rule checks.
    pub kind: RuleKind,
    /// User-facing failure message.
    pub message: String,
}

impl FieldRule {
    /// Creates a new rule.
    #[must_use]
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Error code reported when this rule fails.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.kind.error_code()
    }

    /// True for the `Required` rule.
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(self.kind, RuleKind::Required)
    }
}
