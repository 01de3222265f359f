//! Error types for pharmaform.
//!
//! Validation failures are data ([`ValidationErrors`]) rather than panics.
//! Everything that can go wrong around them is described here: malformed
//! schema definitions, transport failures and submission outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::core::{FieldError, ValidationErrors};
use crate::transport::TransportResponse;

/// Message shown when a transport failure carries no usable text.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

/// The main error type for pharmaform operations.
#[derive(Debug, Error)]
pub enum PharmaformError {
    /// A schema definition was rejected.
    #[error("{0}")]
    Schema(#[from] SchemaDefinitionError),

    /// No schema is registered under the given name.
    #[error("Unknown schema: {0}")]
    UnknownSchema(String),

    /// The form cannot be used in the requested mode.
    #[error("Form '{0}' does not support update mode")]
    UnsupportedMode(String),

    /// A transport could not be constructed or failed outside a submission.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// A submission failed.
    #[error("{0}")]
    Submission(#[from] SubmissionError),
}

/// A schema definition that cannot be built.
///
/// These are programming errors: the built-in schemas are checked once at
/// first use and never fail at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaDefinitionError {
    /// The schema has no name.
    #[error("Schema name cannot be empty")]
    EmptySchemaName,

    /// A field was declared without a name.
    #[error("Schema '{schema}' declares a field with an empty name")]
    EmptyFieldName {
        /// The schema name.
        schema: String,
    },

    /// The same field was declared twice.
    #[error("Schema '{schema}' declares field '{field}' more than once")]
    DuplicateField {
        /// The schema name.
        schema: String,
        /// The repeated field.
        field: String,
    },

    /// A regex pattern failed to compile.
    #[error("Schema '{schema}' field '{field}' has an invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The schema name.
        schema: String,
        /// The field declaring the pattern.
        field: String,
        /// The offending pattern.
        pattern: String,
        /// Compiler message.
        reason: String,
    },

    /// A rule refers to a field the schema does not declare.
    #[error("Schema '{schema}' {context} references undeclared field '{field}'")]
    UndeclaredField {
        /// The schema name.
        schema: String,
        /// Where the reference was found.
        context: String,
        /// The missing field.
        field: String,
    },

    /// A conditional rule has nothing to enforce.
    #[error("Schema '{schema}' conditional rule '{rule}' has no constraints")]
    EmptyConditional {
        /// The schema name.
        schema: String,
        /// The rule description.
        rule: String,
    },

    /// Two schemas were registered under the same name.
    #[error("Schema '{name}' is registered more than once")]
    DuplicateSchema {
        /// The repeated schema name.
        name: String,
    },
}

/// Failure reported by a [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced a response.
    #[error("Network error: {message}")]
    Network {
        /// Underlying error text.
        message: String,
    },

    /// The server answered with a non-2xx status.
    #[error("Request failed with status {status}: {}", self.message())]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, possibly empty.
        message: String,
    },

    /// The response body could not be read.
    #[error("Invalid response: {message}")]
    Decode {
        /// Underlying error text.
        message: String,
    },

    /// The transport itself is misconfigured.
    #[error("Invalid transport configuration: {message}")]
    Configuration {
        /// What is wrong with the configuration.
        message: String,
    },
}

impl TransportError {
    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Builds a status error from a non-2xx response.
    ///
    /// Uses the body's `message` field when present.
    #[must_use]
    pub fn from_response(response: &TransportResponse) -> Self {
        Self::status(response.status, response.message().unwrap_or_default())
    }

    /// HTTP status, for status errors.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// User-facing message, falling back to [`GENERIC_FAILURE_MESSAGE`].
    #[must_use]
    pub fn message(&self) -> &str {
        let raw = match self {
            Self::Network { message }
            | Self::Status { message, .. }
            | Self::Decode { message }
            | Self::Configuration { message } => message.as_str(),
        };
        if raw.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE
        } else {
            raw
        }
    }
}

/// Why a form submission did not reach the server successfully.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    /// The input failed validation; the transport was never called.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// Validation passed but the transport call failed.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Another submission of the same form is still running.
    #[error("A submission is already in flight for this form")]
    InFlight,

    /// The form was torn down; any late result was discarded.
    #[error("Form was torn down before the submission completed")]
    Cancelled,
}

impl SubmissionError {
    /// The failure family of this error.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Validation(_) => FailureKind::ValidationError,
            Self::Transport(_) => FailureKind::TransportError,
            Self::InFlight => FailureKind::InFlight,
            Self::Cancelled => FailureKind::Cancelled,
        }
    }

    /// Field errors, for validation failures.
    #[must_use]
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Converts to the uniform failure shape handed to the UI.
    #[must_use]
    pub fn to_failure(&self) -> SubmissionFailure {
        match self {
            Self::Validation(errors) => SubmissionFailure {
                kind: self.kind(),
                message: format!("{} field(s) need attention", errors.len()),
                status: None,
                field_errors: errors.iter().cloned().collect(),
            },
            Self::Transport(err) => SubmissionFailure {
                kind: self.kind(),
                message: err.message().to_string(),
                status: err.status_code(),
                field_errors: Vec::new(),
            },
            Self::InFlight | Self::Cancelled => SubmissionFailure {
                kind: self.kind(),
                message: self.to_string(),
                status: None,
                field_errors: Vec::new(),
            },
        }
    }
}

/// Failure family reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Recoverable by correcting the input.
    ValidationError,
    /// Network or server failure.
    TransportError,
    /// Ignored because a submission was already running.
    InFlight,
    /// The form instance no longer exists.
    Cancelled,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationError => write!(f, "validation_error"),
            Self::TransportError => write!(f, "transport_error"),
            Self::InFlight => write!(f, "in_flight"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Uniform, serializable failure shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionFailure {
    /// Failure family.
    pub kind: FailureKind,
    /// Summary suitable for a toast or banner.
    pub message: String,
    /// HTTP status for server failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Per-field errors for validation failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ErrorCode, FieldPath};

    #[test]
    fn test_transport_message_falls_back_when_blank() {
        let err = TransportError::status(500, "");
        assert_eq!(err.message(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(err.status_code(), Some(500));

        let err = TransportError::network("connection refused");
        assert_eq!(err.message(), "connection refused");
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_status_display_uses_fallback_when_blank() {
        assert_eq!(
            TransportError::status(500, "  ").to_string(),
            format!("Request failed with status 500: {GENERIC_FAILURE_MESSAGE}")
        );
        assert_eq!(
            TransportError::status(404, "Not found").to_string(),
            "Request failed with status 404: Not found"
        );
    }

    #[test]
    fn test_transport_error_from_response_uses_body_message() {
        let response = TransportResponse::new(409, serde_json::json!({"message": "Item already exists"}));
        let err = TransportError::from_response(&response);
        assert_eq!(err, TransportError::status(409, "Item already exists"));

        let response = TransportResponse::new(502, serde_json::Value::Null);
        assert_eq!(TransportError::from_response(&response).message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_validation_failure_keeps_field_detail() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldError::new(
            FieldPath::field("patientName"),
            ErrorCode::Required,
            "Patient name is required",
        ));
        let err = SubmissionError::Validation(errors);

        let failure = err.to_failure();
        assert_eq!(failure.kind, FailureKind::ValidationError);
        assert_eq!(failure.field_errors.len(), 1);
        assert_eq!(failure.field_errors[0].path, "patientName");
    }

    #[test]
    fn test_transport_failure_shape() {
        let err = SubmissionError::from(TransportError::status(503, ""));
        let failure = err.to_failure();

        assert_eq!(failure.kind, FailureKind::TransportError);
        assert_eq!(failure.message, GENERIC_FAILURE_MESSAGE);
        assert_eq!(failure.status, Some(503));
        assert!(failure.field_errors.is_empty());

        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["kind"], "transport_error");
    }

    #[test]
    fn test_schema_definition_error_display() {
        let err = SchemaDefinitionError::DuplicateField {
            schema: "billing".to_string(),
            field: "upi".to_string(),
        };
        assert_eq!(err.to_string(), "Schema 'billing' declares field 'upi' more than once");
    }
}
