//! Form submission adapter.
//!
//! Ties a schema, an endpoint and a transport together for one form
//! instance and runs the editing, validating and submitting cycle.

mod adapter;
mod state;

#[cfg(test)]
mod integration_tests;

pub use adapter::{FormSubmission, SubmissionReceipt};
pub use state::FormState;
