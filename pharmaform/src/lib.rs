//! # Pharmaform
//!
//! Schema-driven validation and submission for the entity forms of a
//! pharmacy management application.
//!
//! Pharmaform provides:
//!
//! - **Declarative schemas**: ordered field rules plus conditional cross-field rules
//! - **A generic validation engine**: coercion, nested list entries, every error at once
//! - **Entity schemas**: login, registration, users, doctors, items, suppliers,
//!   purchases, purchase returns, billing and supplier payments
//! - **A submission adapter**: one in-flight submission per form, teardown-safe
//! - **A pluggable transport**: an `async` trait with an optional reqwest client
//!
//! ## Quick Start
//!
//! ```rust
//! use pharmaform::prelude::*;
//! use serde_json::json;
//!
//! let schema = SchemaRegistry::builtin().schema(FormKind::Billing).unwrap();
//! let input = json!({
//!     "patientName": "",
//!     "patientId1": "P1",
//!     "patientType": "OPD",
//!     "doctorId": "D1",
//!     "paymentStatus": "paid"
//! });
//!
//! let result = schema.validate(input.as_object().unwrap());
//! assert_eq!(result.errors().unwrap().paths(), vec!["patientName", "paymentType"]);
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod cancellation;
pub mod core;
pub mod errors;
pub mod observability;
pub mod schema;
pub mod submission;
pub mod testing;
pub mod transport;
pub mod validation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        ErrorCode, FieldError, FieldPath, FormKind, ValidationErrors, ValidationResult,
    };
    pub use crate::errors::{
        FailureKind, PharmaformError, SchemaDefinitionError, SubmissionError,
        SubmissionFailure, TransportError,
    };
    pub use crate::observability::{init_tracing, LogFormat};
    pub use crate::schema::{Predicate, Schema, SchemaBuilder, SchemaRegistry, ValueKind};
    pub use crate::submission::{FormState, FormSubmission, SubmissionReceipt};
    #[cfg(feature = "http")]
    pub use crate::transport::HttpTransport;
    pub use crate::transport::{
        AuthToken, Endpoint, FormMode, Method, Transport, TransportConfig, TransportRequest,
        TransportResponse,
    };
    pub use crate::validation::validate;
}
