//! Generic schema interpreter.

use serde_json::{Map, Value};
use std::time::Instant;
use tracing::debug;

use super::conditional::apply_conditionals;
use super::rules::{run_rules, RuleOutcome};
use crate::core::value::is_absent;
use crate::core::{ErrorCode, FieldError, FieldPath, ValidationErrors, ValidationResult};
use crate::schema::{FieldSpec, Schema};

/// Validates `input` against `schema`.
///
/// Pure: the input is never modified and the same input always produces
/// the same result. Undeclared keys are dropped from the normalized value.
#[must_use]
pub fn validate(schema: &Schema, input: &Map<String, Value>) -> ValidationResult {
    let started = Instant::now();
    let mut errors = ValidationErrors::new();
    let value = validate_object(schema, input, &FieldPath::root(), &mut errors);

    debug!(
        schema = schema.name(),
        fields = input.len(),
        errors = errors.len(),
        duration_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        "validated form input"
    );

    if errors.is_empty() {
        ValidationResult::Valid(value)
    } else {
        ValidationResult::Invalid(errors)
    }
}

fn validate_object(
    schema: &Schema,
    input: &Map<String, Value>,
    prefix: &FieldPath,
    errors: &mut ValidationErrors,
) -> Map<String, Value> {
    let mut normalized = Map::new();
    let mut view = input.clone();

    for field in schema.fields() {
        let path = prefix.child(field.name());
        if let Some(value) = validate_field(field, input, &path, errors) {
            view.insert(field.name().to_string(), value.clone());
            normalized.insert(field.name().to_string(), value);
        }
    }

    apply_conditionals(schema, &view, prefix, errors);
    normalized
}

fn validate_field(
    field: &FieldSpec,
    input: &Map<String, Value>,
    path: &FieldPath,
    errors: &mut ValidationErrors,
) -> Option<Value> {
    let raw = input.get(field.name());
    if field.is_list() && !is_absent(raw) && !matches!(raw, Some(Value::Array(_))) {
        errors.push(FieldError::new(
            path.clone(),
            ErrorCode::InvalidType,
            format!("{} must be a list", field.name()),
        ));
        return None;
    }

    match run_rules(field.rules(), raw, input) {
        RuleOutcome::Absent => None,
        RuleOutcome::Failed(rule) => {
            errors.push(FieldError::new(path.clone(), rule.code(), rule.message.clone()));
            None
        }
        RuleOutcome::Value(Value::Array(entries)) if field.is_list() => {
            let element = field.element()?;
            Some(Value::Array(validate_entries(element, &entries, path, errors)))
        }
        RuleOutcome::Value(value) => Some(value),
    }
}

fn validate_entries(
    element: &Schema,
    entries: &[Value],
    path: &FieldPath,
    errors: &mut ValidationErrors,
) -> Vec<Value> {
    let mut normalized = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let entry_path = path.index(index);
        match entry {
            Value::Object(object) => {
                let value = validate_object(element, object, &entry_path, errors);
                normalized.push(Value::Object(value));
            }
            _ => {
                errors.push(FieldError::new(
                    entry_path,
                    ErrorCode::InvalidType,
                    "Each entry must be an object",
                ));
            }
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Predicate;
    use crate::testing::{assert_error_paths, assert_field_error, assert_valid, input};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn order_schema() -> Schema {
        let line = Schema::builder("line")
            .field("sku", |f| f.required("SKU is required").trim())
            .field("qty", |f| {
                f.required("Quantity is required")
                    .integer("Quantity must be a whole number")
                    .positive("Quantity must be positive")
            })
            .field("discounted", |f| f.boolean("Expected true or false"))
            .field("discount", |f| f.number("Discount must be a number"))
            .when("discounted lines", Predicate::equals("discounted", true), |c| {
                c.check("discount", |f| f.required("Discount is required").positive("Discount must be positive"))
            })
            .build()
            .unwrap();

        Schema::builder("order")
            .field("customer", |f| f.required("Customer is required").trim().min_len(2, "Too short"))
            .field("note", |f| f.trim().max_len(10, "Too long"))
            .list("lines", line, |f| f.required("Lines are required").min_items(1, "Add a line"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_valid_input_is_normalized() {
        let value = assert_valid(&order_schema().validate(&input(json!({
            "customer": "  Asha ",
            "lines": [{"sku": "A1", "qty": "3", "discounted": "true", "discount": "5"}],
            "extra": "dropped"
        }))));

        assert_eq!(
            value,
            input(json!({
                "customer": "Asha",
                "lines": [{"sku": "A1", "qty": 3, "discounted": true, "discount": 5}]
            }))
        );
    }

    #[test]
    fn test_blank_optional_field_is_omitted() {
        let value = assert_valid(&order_schema().validate(&input(json!({
            "customer": "Asha",
            "note": "   ",
            "lines": [{"sku": "A1", "qty": 1}]
        }))));
        assert!(!value.contains_key("note"));
    }

    #[test]
    fn test_errors_follow_declaration_order() {
        let result = order_schema().validate(&input(json!({
            "lines": [
                {"sku": "A1", "qty": 0},
                {"qty": "x"},
                {"sku": "C3", "qty": 2, "discounted": true}
            ],
            "note": "far too long for this",
            "customer": "A"
        })));

        assert_error_paths(
            &result,
            &[
                "customer",
                "note",
                "lines[0].qty",
                "lines[1].sku",
                "lines[1].qty",
                "lines[2].discount",
            ],
        );
        assert_field_error(&result, "lines[1].qty", ErrorCode::InvalidType);
        assert_field_error(&result, "lines[2].discount", ErrorCode::Required);
    }

    #[test]
    fn test_list_shape_errors() {
        let schema = order_schema();
        let result = schema.validate(&input(json!({"customer": "Asha", "lines": {"sku": "A1"}})));
        assert_field_error(&result, "lines", ErrorCode::InvalidType);

        let result = schema.validate(&input(json!({"customer": "Asha", "lines": [1, {"sku": "B", "qty": 1}]})));
        assert_error_paths(&result, &["lines[0]"]);
        assert_field_error(&result, "lines[0]", ErrorCode::InvalidType);
    }

    #[test]
    fn test_input_is_not_modified() {
        let raw = input(json!({"customer": "  Asha ", "lines": [{"sku": " A1 ", "qty": "1"}]}));
        let before = raw.clone();
        let _ = order_schema().validate(&raw);
        assert_eq!(raw, before);
    }

    #[test]
    fn test_conditionals_see_coerced_values() {
        let schema = Schema::builder("s")
            .field("kind", |f| f.trim())
            .field("count", |f| f.integer("Whole number"))
            .when("big", Predicate::equals("count", 2), |c| c.require("kind", "Kind is required"))
            .build()
            .unwrap();

        let result = schema.validate(&input(json!({"count": " 2 "})));
        assert_error_paths(&result, &["kind"]);
    }
}
