//! Cross-field rules activated by a predicate over the whole input.

use serde_json::{Map, Value};

use super::FieldRule;
use crate::core::value::is_absent;

/// Condition over a candidate object.
///
/// Predicates read field values only; string comparisons ignore
/// surrounding whitespace.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Field equals the value.
    Equals {
        /// Field name.
        field: String,
        /// Expected value.
        value: Value,
    },
    /// Field is present and differs from the value.
    NotEquals {
        /// Field name.
        field: String,
        /// Rejected value.
        value: Value,
    },
    /// Field equals one of the values.
    OneOf {
        /// Field name.
        field: String,
        /// Accepted values.
        values: Vec<Value>,
    },
    /// Field is present and non-blank.
    Present(String),
    /// Field is missing, null or blank.
    Absent(String),
    /// Every inner predicate holds.
    All(Vec<Predicate>),
    /// At least one inner predicate holds.
    Any(Vec<Predicate>),
    /// The inner predicate does not hold.
    Not(Box<Predicate>),
}

impl Predicate {
    /// `field == value`.
    #[must_use]
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// `field != value` (and present).
    #[must_use]
    pub fn not_equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::NotEquals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// `field in values`.
    #[must_use]
    pub fn one_of<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self::OneOf {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Field is provided.
    #[must_use]
    pub fn present(field: impl Into<String>) -> Self {
        Self::Present(field.into())
    }

    /// Field is not provided.
    #[must_use]
    pub fn absent(field: impl Into<String>) -> Self {
        Self::Absent(field.into())
    }

    /// Conjunction with another predicate.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::All(mut inner) => {
                inner.push(other);
                Self::All(inner)
            }
            first => Self::All(vec![first, other]),
        }
    }

    /// Disjunction with another predicate.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Any(mut inner) => {
                inner.push(other);
                Self::Any(inner)
            }
            first => Self::Any(vec![first, other]),
        }
    }

    /// Negation.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Evaluates the predicate against a candidate object.
    #[must_use]
    pub fn evaluate(&self, candidate: &Map<String, Value>) -> bool {
        match self {
            Self::Equals { field, value } => candidate
                .get(field)
                .is_some_and(|actual| values_equal(actual, value)),
            Self::NotEquals { field, value } => {
                let actual = candidate.get(field);
                !is_absent(actual) && actual.is_some_and(|actual| !values_equal(actual, value))
            }
            Self::OneOf { field, values } => candidate
                .get(field)
                .is_some_and(|actual| values.iter().any(|v| values_equal(actual, v))),
            Self::Present(field) => !is_absent(candidate.get(field)),
            Self::Absent(field) => is_absent(candidate.get(field)),
            Self::All(inner) => inner.iter().all(|p| p.evaluate(candidate)),
            Self::Any(inner) => inner.iter().any(|p| p.evaluate(candidate)),
            Self::Not(inner) => !inner.evaluate(candidate),
        }
    }

    /// Every field name the predicate reads.
    #[must_use]
    pub fn referenced_fields(&self) -> Vec<&str> {
        match self {
            Self::Equals { field, .. }
            | Self::NotEquals { field, .. }
            | Self::OneOf { field, .. }
            | Self::Present(field)
            | Self::Absent(field) => vec![field.as_str()],
            Self::All(inner) | Self::Any(inner) => {
                inner.iter().flat_map(Self::referenced_fields).collect()
            }
            Self::Not(inner) => inner.referenced_fields(),
        }
    }
}

fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::String(a), Value::String(b)) => a.trim() == b.trim(),
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => actual == expected,
    }
}

/// Rules applied to one field when a conditional rule fires.
#[derive(Debug, Clone)]
pub struct FieldConstraint {
    /// Target field name.
    pub field: String,
    /// Rules to run, in order.
    pub rules: Vec<FieldRule>,
}

/// A predicate plus the field constraints it activates.
#[derive(Debug, Clone)]
pub struct ConditionalRule {
    /// Human-readable description, used in logs and definition errors.
    pub description: String,
    /// Activation condition.
    pub when: Predicate,
    /// Constraints enforced while the condition holds.
    pub then: Vec<FieldConstraint>,
}
