//! Cross-field rule evaluation.

use serde_json::{Map, Value};
use tracing::trace;

use super::rules::{run_rules, RuleOutcome};
use crate::core::{FieldError, FieldPath, ValidationErrors};
use crate::schema::Schema;

/// Runs every conditional rule of `schema` against `view`.
///
/// `view` holds the coerced value of each field that passed its own rules
/// and the raw value of every other field. Rules fire in declaration order
/// and read `view` only, so one rule never sees the effect of another.
/// A constraint on a path that already carries an error is skipped.
pub fn apply_conditionals(
    schema: &Schema,
    view: &Map<String, Value>,
    prefix: &FieldPath,
    errors: &mut ValidationErrors,
) {
    for rule in schema.conditionals() {
        if !rule.when.evaluate(view) {
            continue;
        }
        trace!(schema = schema.name(), rule = %rule.description, "conditional rule active");

        for constraint in &rule.then {
            let path = prefix.child(constraint.field.as_str());
            if errors.contains_path(&path) {
                continue;
            }
            if let RuleOutcome::Failed(failed) =
                run_rules(&constraint.rules, view.get(&constraint.field), view)
            {
                errors.push(FieldError::new(path, failed.code(), failed.message.clone()));
            }
        }
    }
}
