//! Immutable schema values.

use serde_json::{Map, Value};
use std::sync::Arc;

use super::{ConditionalRule, FieldRule, SchemaBuilder};
use crate::core::ValidationResult;
use crate::validation;

/// A declared field: its ordered rules and, for list fields, the schema of
/// each entry.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub(crate) name: String,
    pub(crate) rules: Vec<FieldRule>,
    pub(crate) element: Option<Arc<Schema>>,
}

impl FieldSpec {
    /// Field name as it appears in the input.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Entry schema for list fields.
    #[must_use]
    pub fn element(&self) -> Option<&Schema> {
        self.element.as_deref()
    }

    /// True when the field carries a `Required` rule.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.rules.iter().any(FieldRule::is_required)
    }

    /// True for list fields.
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.element.is_some()
    }
}

/// Declarative description of one entity form.
///
/// Built once through [`SchemaBuilder`] and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) name: String,
    pub(crate) fields: Vec<FieldSpec>,
    pub(crate) conditionals: Vec<ConditionalRule>,
}

impl Schema {
    /// Starts building a schema.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    /// Schema name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// True when the schema declares `name`.
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Declared field names in order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(FieldSpec::name).collect()
    }

    /// Conditional rules in declaration order.
    #[must_use]
    pub fn conditionals(&self) -> &[ConditionalRule] {
        &self.conditionals
    }

    /// Validates an input object against this schema.
    #[must_use]
    pub fn validate(&self, input: &Map<String, Value>) -> ValidationResult {
        validation::validate(self, input)
    }
}
