//! Validation outcome types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use super::FieldPath;

/// Family of the rule that produced a [`FieldError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A required value was absent or blank.
    Required,
    /// The value could not be coerced to the declared kind.
    InvalidType,
    /// Text or list shorter than the declared minimum.
    TooShort,
    /// Text longer than the declared maximum.
    TooLong,
    /// Text did not match the declared pattern.
    Pattern,
    /// Number below the declared minimum.
    TooSmall,
    /// Number above the declared maximum.
    TooBig,
    /// Number was zero or negative where a positive value is required.
    NotPositive,
    /// Value outside the declared set of options.
    InvalidOption,
    /// Value differs from the field it must match.
    Mismatch,
    /// Text is not a valid calendar date.
    InvalidDate,
}

impl ErrorCode {
    /// Stable string form, as used in serialized errors.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidType => "invalid_type",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::Pattern => "pattern",
            Self::TooSmall => "too_small",
            Self::TooBig => "too_big",
            Self::NotPositive => "not_positive",
            Self::InvalidOption => "invalid_option",
            Self::Mismatch => "mismatch",
            Self::InvalidDate => "invalid_date",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed rule, tied to the field it failed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Where the failing value lives.
    pub path: FieldPath,
    /// Which rule family failed.
    pub code: ErrorCode,
    /// User-facing message from the rule declaration.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub fn new(path: FieldPath, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            path,
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Ordered set of field errors with at most one error per path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Creates an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an error unless its path already has one.
    ///
    /// Returns whether the error was recorded.
    pub fn push(&mut self, error: FieldError) -> bool {
        if self.contains_path(&error.path) {
            return false;
        }
        self.errors.push(error);
        true
    }

    /// True when an error is already recorded at `path`.
    #[must_use]
    pub fn contains_path(&self, path: &FieldPath) -> bool {
        self.errors.iter().any(|e| &e.path == path)
    }

    /// Looks up the error recorded at a rendered path such as `items[0].batchNo`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.path == path)
    }

    /// Iterates errors in the order they were recorded.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Rendered paths of all errors, in order.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.path.to_string()).collect()
    }

    /// Number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True when no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Path to message map, the shape form UIs bind to.
    #[must_use]
    pub fn to_field_map(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|e| (e.path.to_string(), e.message.clone()))
            .collect()
    }

    /// Consumes the set and returns the underlying errors.
    #[must_use]
    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Outcome of applying a schema to one input.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// Every rule passed; holds the normalized object.
    Valid(Map<String, Value>),
    /// At least one rule failed.
    Invalid(ValidationErrors),
}

impl ValidationResult {
    /// True when there are no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The normalized value, if valid.
    #[must_use]
    pub fn value(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }

    /// The errors, if invalid.
    #[must_use]
    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(errors) => Some(errors),
        }
    }

    /// Number of errors (zero when valid).
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors().map_or(0, ValidationErrors::len)
    }

    /// Converts into a standard `Result`.
    pub fn into_result(self) -> Result<Map<String, Value>, ValidationErrors> {
        match self {
            Self::Valid(value) => Ok(value),
            Self::Invalid(errors) => Err(errors),
        }
    }
}
