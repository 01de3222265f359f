//! Core domain model types for pharmaform.
//!
//! This module contains the fundamental types used throughout the crate:
//! - Field paths used to address values inside form input
//! - Field errors and the validation result
//! - The catalog of entity forms

mod form;
mod path;
mod result;
pub mod value;

pub use form::FormKind;
pub use path::{FieldPath, PathSegment};
pub use result::{ErrorCode, FieldError, ValidationErrors, ValidationResult};
