//! Validation engine.
//!
//! Interprets a [`Schema`](crate::schema::Schema) against a JSON object:
//! per-field rule lists first, then conditional rules over the partially
//! coerced object. Every failure is collected, never just the first.

mod coercion;
mod conditional;
mod engine;
mod rules;

pub use coercion::{coerce, parse_number};
pub use conditional::apply_conditionals;
pub use engine::validate;
