//! Login, registration and staff user forms.

use super::{EMAIL_MESSAGE, MOBILE_MESSAGE};
use crate::errors::SchemaDefinitionError;
use crate::schema::Schema;

/// Sign-in form.
pub fn login() -> Result<Schema, SchemaDefinitionError> {
    Schema::builder("login")
        .field("email", |f| {
            f.required("Email is required").trim().email(EMAIL_MESSAGE)
        })
        .field("password", |f| {
            f.required("Password is required")
                .min_len(6, "Password must be at least 6 characters")
        })
        .build()
}

/// Account sign-up form.
pub fn registration() -> Result<Schema, SchemaDefinitionError> {
    Schema::builder("registration")
        .field("name", |f| {
            f.required("Name is required")
                .trim()
                .min_len(2, "Name must be at least 2 characters")
                .max_len(80, "Name must be at most 80 characters")
        })
        .field("email", |f| {
            f.required("Email is required").trim().email(EMAIL_MESSAGE)
        })
        .field("mobile", |f| f.required("Mobile number is required").phone(MOBILE_MESSAGE))
        .field("password", |f| {
            f.required("Password is required")
                .min_len(6, "Password must be at least 6 characters")
        })
        .field("confirmPassword", |f| {
            f.required("Please confirm your password")
                .matches("password", "Passwords do not match")
        })
        .build()
}

/// Staff user management form.
pub fn user() -> Result<Schema, SchemaDefinitionError> {
    Schema::builder("user")
        .field("name", |f| {
            f.required("Name is required")
                .trim()
                .min_len(2, "Name must be at least 2 characters")
        })
        .field("email", |f| {
            f.required("Email is required").trim().email(EMAIL_MESSAGE)
        })
        .field("mobile", |f| f.required("Mobile number is required").phone(MOBILE_MESSAGE))
        .field("role", |f| {
            f.required("Role is required")
                .trim()
                .one_of(&["admin", "pharmacist", "staff"], "Select a valid role")
        })
        .field("password", |f| {
            f.min_len(6, "Password must be at least 6 characters")
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{assert_field_error, assert_valid, input};
    use crate::core::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_login_valid() {
        let schema = login().unwrap();
        let value = assert_valid(&schema.validate(&input(json!({
            "email": "  owner@pharmacy.in ",
            "password": "secret1"
        }))));
        assert_eq!(value["email"], json!("owner@pharmacy.in"));
    }

    #[test]
    fn test_login_errors() {
        let schema = login().unwrap();
        let result = schema.validate(&input(json!({"email": "not-an-email", "password": "123"})));
        assert_field_error(&result, "email", ErrorCode::Pattern);
        assert_field_error(&result, "password", ErrorCode::TooShort);
    }

    #[test]
    fn test_registration_password_mismatch() {
        let schema = registration().unwrap();
        let result = schema.validate(&input(json!({
            "name": "Asha",
            "email": "asha@example.com",
            "mobile": "98765 43210",
            "password": "secret1",
            "confirmPassword": "secret2"
        })));
        assert_field_error(&result, "confirmPassword", ErrorCode::Mismatch);
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn test_user_role_and_optional_password() {
        let schema = user().unwrap();
        let value = assert_valid(&schema.validate(&input(json!({
            "name": "Ravi",
            "email": "ravi@example.com",
            "mobile": 9876543210_u64,
            "role": "pharmacist"
        }))));
        assert_eq!(value["mobile"], json!("9876543210"));
        assert!(!value.contains_key("password"));

        let result = schema.validate(&input(json!({
            "name": "Ravi",
            "email": "ravi@example.com",
            "mobile": "9876543210",
            "role": "owner"
        })));
        assert_field_error(&result, "role", ErrorCode::InvalidOption);
    }
}
