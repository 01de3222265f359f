//! Declarative form schemas.
//!
//! This module provides:
//! - Field rules and conditional (cross-field) rules
//! - The fluent [`SchemaBuilder`]
//! - The process-wide [`SchemaRegistry`] of entity schemas

mod builder;
mod conditional;
mod definition;
pub mod entities;
mod registry;
mod rule;

pub use builder::{ConditionalBuilder, FieldBuilder, SchemaBuilder};
pub use conditional::{ConditionalRule, FieldConstraint, Predicate};
pub use definition::{FieldSpec, Schema};
pub use registry::SchemaRegistry;
pub use rule::{FieldRule, RuleKind, ValueKind};
