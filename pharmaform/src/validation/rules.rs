//! Runs an ordered rule list against a single value.

use serde_json::{Map, Value};
use tracing::trace;

use super::coercion::{coerce, parse_number};
use crate::core::value::{is_absent, scalar_text};
use crate::schema::{FieldRule, RuleKind};

/// Result of running one field's rules.
#[derive(Debug)]
pub(crate) enum RuleOutcome<'r> {
    /// Not provided and not required.
    Absent,
    /// Every rule passed; carries the transformed value.
    Value(Value),
    /// The first rule that failed.
    Failed(&'r FieldRule),
}

/// Applies `rules` in order, stopping at the first failure.
///
/// An absent value only fails a `Required` rule; every other rule is
/// skipped for it. `siblings` is the object the value came from and is
/// read by field-matching rules.
pub(crate) fn run_rules<'r>(
    rules: &'r [FieldRule],
    raw: Option<&Value>,
    siblings: &Map<String, Value>,
) -> RuleOutcome<'r> {
    let mut current = match raw {
        Some(value) if !is_absent(raw) => value.clone(),
        _ => {
            return rules
                .iter()
                .find(|rule| rule.is_required())
                .map_or(RuleOutcome::Absent, RuleOutcome::Failed);
        }
    };

    for rule in rules {
        match apply_rule(&rule.kind, current, siblings) {
            Some(next) => current = next,
            None => {
                trace!(rule = rule.kind.name(), "rule rejected value");
                return RuleOutcome::Failed(rule);
            }
        }
    }
    RuleOutcome::Value(current)
}

/// Applies one rule to a present value.
///
/// Returns the possibly transformed value, or `None` when the rule fails.
pub(crate) fn apply_rule(
    kind: &RuleKind,
    value: Value,
    siblings: &Map<String, Value>,
) -> Option<Value> {
    let passes = match kind {
        RuleKind::Required => true,
        RuleKind::Trim => {
            return match value {
                Value::String(s) => Some(Value::String(s.trim().to_string())),
                Value::Array(_) | Value::Object(_) => None,
                other => Some(other),
            };
        }
        RuleKind::Coerce(target) => return coerce(&value, *target),
        RuleKind::MinLength(len) => char_count(&value).is_some_and(|n| n >= *len),
        RuleKind::MaxLength(len) => char_count(&value).is_some_and(|n| n <= *len),
        RuleKind::Pattern(regex) => scalar_text(&value).is_some_and(|t| regex.is_match(&t)),
        RuleKind::Min(bound) => parse_number(&value).is_some_and(|n| n >= *bound),
        RuleKind::Max(bound) => parse_number(&value).is_some_and(|n| n <= *bound),
        RuleKind::Positive => parse_number(&value).is_some_and(|n| n > 0.0),
        RuleKind::NonNegative => parse_number(&value).is_some_and(|n| n >= 0.0),
        RuleKind::OneOf(options) => scalar_text(&value)
            .is_some_and(|t| options.iter().any(|option| option == t.trim())),
        RuleKind::MatchesField(other) => siblings
            .get(other)
            .is_some_and(|expected| same_value(expected, &value)),
        RuleKind::MinItems(count) => value.as_array().is_some_and(|items| items.len() >= *count),
    };
    passes.then_some(value)
}

fn char_count(value: &Value) -> Option<usize> {
    scalar_text(value).map(|text| text.chars().count())
}

fn same_value(a: &Value, b: &Value) -> bool {
    match (scalar_text(a), scalar_text(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}
