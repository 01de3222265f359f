//! Test assertions for validation results.

use serde_json::{Map, Value};

use crate::core::{ErrorCode, FieldError, ValidationErrors, ValidationResult};

/// Asserts that validation passed and returns the normalized value.
pub fn assert_valid(result: &ValidationResult) -> Map<String, Value> {
    match result {
        ValidationResult::Valid(value) => value.clone(),
        ValidationResult::Invalid(errors) => panic!("Expected valid input, got {errors}"),
    }
}

/// Asserts that validation failed and returns the errors.
pub fn assert_invalid(result: &ValidationResult) -> &ValidationErrors {
    match result {
        ValidationResult::Invalid(errors) => errors,
        ValidationResult::Valid(value) => panic!("Expected validation errors, got valid value {value:?}"),
    }
}

fn error_at<'a>(result: &'a ValidationResult, path: &str) -> &'a FieldError {
    let errors = assert_invalid(result);
    errors.get(path).unwrap_or_else(|| {
        panic!(
            "Expected an error at '{}', but it has none. Paths: {:?}",
            path,
            errors.paths()
        )
    })
}

/// Asserts that `path` failed with `code`.
pub fn assert_field_error(result: &ValidationResult, path: &str, code: ErrorCode) {
    let error = error_at(result, path);
    assert_eq!(
        error.code, code,
        "Expected {:?} at '{}', got {:?} ({})",
        code, path, error.code, error.message
    );
}

/// Asserts the message reported at `path`.
pub fn assert_field_message(result: &ValidationResult, path: &str, message: &str) {
    let error = error_at(result, path);
    assert_eq!(error.message, message, "Unexpected message at '{path}'");
}

/// Asserts that `path` has no error.
pub fn assert_no_field_error(result: &ValidationResult, path: &str) {
    if let Some(error) = result.errors().and_then(|errors| errors.get(path)) {
        panic!("Expected no error at '{path}', got {:?}: {}", error.code, error.message);
    }
}

/// Asserts the exact error paths, in reporting order.
pub fn assert_error_paths(result: &ValidationResult, expected: &[&str]) {
    let actual = result.errors().map(ValidationErrors::paths).unwrap_or_default();
    assert_eq!(actual, expected, "Unexpected error paths");
}

/// Asserts the number of errors.
pub fn assert_error_count(result: &ValidationResult, expected: usize) {
    assert_eq!(
        result.error_count(),
        expected,
        "Expected {} error(s), got {:?}",
        expected,
        result.errors().map(ValidationErrors::paths)
    );
}
