//! Testing utilities for pharmaform forms.
//!
//! This module provides:
//! - Transport doubles
//! - Assertions over validation results
//! - Ready-made valid inputs

mod assertions;
pub mod fixtures;
mod mocks;

pub use assertions::{
    assert_error_count, assert_error_paths, assert_field_error, assert_field_message,
    assert_invalid, assert_no_field_error, assert_valid,
};
pub use fixtures::input;
pub use mocks::{FailingTransport, RecordingTransport, SlowTransport};
