//! Fluent DSL for declaring schemas.
//!
//! ```rust
//! use pharmaform::schema::{Predicate, Schema};
//!
//! let schema = Schema::builder("payment")
//!     .field("mode", |f| f.required("Mode is required").trim().one_of(&["cash", "upi"], "Invalid mode"))
//!     .field("amount", |f| f.number("Amount must be a number").non_negative("Amount cannot be negative"))
//!     .when("cash needs an amount", Predicate::equals("mode", "cash"), |c| {
//!         c.check("amount", |f| f.required("Amount is required").positive("Amount must be positive"))
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.field_names(), vec!["mode", "amount"]);
//! ```

use regex::Regex;
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use super::{
    ConditionalRule, FieldConstraint, FieldRule, FieldSpec, Predicate, RuleKind, Schema, ValueKind,
};
use crate::errors::SchemaDefinitionError;

#[allow(clippy::expect_used)]
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Collects the ordered rules of one field.
#[derive(Debug, Default)]
pub struct FieldBuilder {
    rules: Vec<FieldRule>,
    bad_patterns: Vec<(String, String)>,
}

impl FieldBuilder {
    fn push(mut self, kind: RuleKind, message: impl Into<String>) -> Self {
        self.rules.push(FieldRule::new(kind, message));
        self
    }

    /// Adds an arbitrary rule.
    #[must_use]
    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Field must be present and non-blank.
    #[must_use]
    pub fn required(self, message: impl Into<String>) -> Self {
        self.push(RuleKind::Required, message)
    }

    /// Trims surrounding whitespace.
    #[must_use]
    pub fn trim(self) -> Self {
        self.push(RuleKind::Trim, "Expected text")
    }

    /// Coerces to text.
    #[must_use]
    pub fn text(self, message: impl Into<String>) -> Self {
        self.push(RuleKind::Coerce(ValueKind::Text), message)
    }

    /// Coerces to a number.
    #[must_use]
    pub fn number(self, message: impl Into<String>) -> Self {
        self.push(RuleKind::Coerce(ValueKind::Number), message)
    }

    /// Coerces to a whole number.
    #[must_use]
    pub fn integer(self, message: impl Into<String>) -> Self {
        self.push(RuleKind::Coerce(ValueKind::Integer), message)
    }

    /// Coerces to a boolean.
    #[must_use]
    pub fn boolean(self, message: impl Into<String>) -> Self {
        self.push(RuleKind::Coerce(ValueKind::Boolean), message)
    }

    /// Coerces to a normalized ten-digit mobile number.
    #[must_use]
    pub fn phone(self, message: impl Into<String>) -> Self {
        self.push(RuleKind::Coerce(ValueKind::Phone), message)
    }

    /// Coerces to a `YYYY-MM-DD` date.
    #[must_use]
    pub fn date(self, message: impl Into<String>) -> Self {
        self.push(RuleKind::Coerce(ValueKind::Date), message)
    }

    /// Minimum length in characters.
    #[must_use]
    pub fn min_len(self, len: usize, message: impl Into<String>) -> Self {
        self.push(RuleKind::MinLength(len), message)
    }

    /// Maximum length in characters.
    #[must_use]
    pub fn max_len(self, len: usize, message: impl Into<String>) -> Self {
        self.push(RuleKind::MaxLength(len), message)
    }

    /// Must match `pattern`. An invalid pattern fails [`SchemaBuilder::build`].
    #[must_use]
    pub fn pattern(mut self, pattern: &str, message: impl Into<String>) -> Self {
        match Regex::new(pattern) {
            Ok(regex) => self.push(RuleKind::Pattern(regex), message),
            Err(err) => {
                self.bad_patterns.push((pattern.to_string(), err.to_string()));
                self
            }
        }
    }

    /// Must look like an email address.
    #[must_use]
    pub fn email(self, message: impl Into<String>) -> Self {
        self.push(RuleKind::Pattern(EMAIL.clone()), message)
    }

    /// Inclusive lower bound.
    #[must_use]
    pub fn min(self, bound: f64, message: impl Into<String>) -> Self {
        self.push(RuleKind::Min(bound), message)
    }

    /// Inclusive upper bound.
    #[must_use]
    pub fn max(self, bound: f64, message: impl Into<String>) -> Self {
        self.push(RuleKind::Max(bound), message)
    }

    /// Strictly greater than zero.
    #[must_use]
    pub fn positive(self, message: impl Into<String>) -> Self {
        self.push(RuleKind::Positive, message)
    }

    /// Zero or more.
    #[must_use]
    pub fn non_negative(self, message: impl Into<String>) -> Self {
        self.push(RuleKind::NonNegative, message)
    }

    /// Must equal one of `options`.
    #[must_use]
    pub fn one_of(self, options: &[&str], message: impl Into<String>) -> Self {
        let options = options.iter().map(|o| (*o).to_string()).collect();
        self.push(RuleKind::OneOf(options), message)
    }

    /// Must equal the value of `other`.
    #[must_use]
    pub fn matches(self, other: impl Into<String>, message: impl Into<String>) -> Self {
        self.push(RuleKind::MatchesField(other.into()), message)
    }

    /// List must have at least `count` entries.
    #[must_use]
    pub fn min_items(self, count: usize, message: impl Into<String>) -> Self {
        self.push(RuleKind::MinItems(count), message)
    }
}

/// Collects the constraints activated by one conditional rule.
#[derive(Debug, Default)]
pub struct ConditionalBuilder {
    constraints: Vec<(String, FieldBuilder)>,
}

impl ConditionalBuilder {
    /// Requires `field` while the condition holds.
    #[must_use]
    pub fn require(self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.check(field, |f| f.required(message))
    }

    /// Applies arbitrary rules to `field` while the condition holds.
    #[must_use]
    pub fn check(
        mut self,
        field: impl Into<String>,
        build: impl FnOnce(FieldBuilder) -> FieldBuilder,
    ) -> Self {
        self.constraints
            .push((field.into(), build(FieldBuilder::default())));
        self
    }
}

/// Builder for [`Schema`].
///
/// Definition problems are collected and reported by [`build`](Self::build).
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldSpec>,
    conditionals: Vec<ConditionalRule>,
    errors: Vec<SchemaDefinitionError>,
}

impl SchemaBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            conditionals: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Declares a scalar field.
    #[must_use]
    pub fn field(
        self,
        name: impl Into<String>,
        build: impl FnOnce(FieldBuilder) -> FieldBuilder,
    ) -> Self {
        self.declare(name.into(), build(FieldBuilder::default()), None)
    }

    /// Declares a list field whose entries follow `element`.
    #[must_use]
    pub fn list(
        self,
        name: impl Into<String>,
        element: Schema,
        build: impl FnOnce(FieldBuilder) -> FieldBuilder,
    ) -> Self {
        self.declare(name.into(), build(FieldBuilder::default()), Some(Arc::new(element)))
    }

    /// Declares a conditional rule.
    #[must_use]
    pub fn when(
        mut self,
        description: impl Into<String>,
        predicate: Predicate,
        build: impl FnOnce(ConditionalBuilder) -> ConditionalBuilder,
    ) -> Self {
        let description = description.into();
        let mut then = Vec::new();
        for (field, builder) in build(ConditionalBuilder::default()).constraints {
            self.record_bad_patterns(&field, &builder.bad_patterns);
            then.push(FieldConstraint {
                field,
                rules: builder.rules,
            });
        }
        self.conditionals.push(ConditionalRule {
            description,
            when: predicate,
            then,
        });
        self
    }

    fn declare(mut self, name: String, builder: FieldBuilder, element: Option<Arc<Schema>>) -> Self {
        self.record_bad_patterns(&name, &builder.bad_patterns);
        self.fields.push(FieldSpec {
            name,
            rules: builder.rules,
            element,
        });
        self
    }

    fn record_bad_patterns(&mut self, field: &str, bad: &[(String, String)]) {
        for (pattern, reason) in bad {
            self.errors.push(SchemaDefinitionError::InvalidPattern {
                schema: self.name.clone(),
                field: field.to_string(),
                pattern: pattern.clone(),
                reason: reason.clone(),
            });
        }
    }

    /// Checks the definition and produces the immutable schema.
    ///
    /// Reports the first problem found.
    pub fn build(mut self) -> Result<Schema, SchemaDefinitionError> {
        if self.name.trim().is_empty() {
            return Err(SchemaDefinitionError::EmptySchemaName);
        }
        if !self.errors.is_empty() {
            return Err(self.errors.remove(0));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(SchemaDefinitionError::EmptyFieldName {
                    schema: self.name.clone(),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaDefinitionError::DuplicateField {
                    schema: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        let undeclared = |context: String, field: &str| SchemaDefinitionError::UndeclaredField {
            schema: self.name.clone(),
            context,
            field: field.to_string(),
        };

        for field in &self.fields {
            for rule in &field.rules {
                if let RuleKind::MatchesField(other) = &rule.kind {
                    if !seen.contains(other.as_str()) {
                        return Err(undeclared(format!("field '{}'", field.name), other));
                    }
                }
            }
        }

        for rule in &self.conditionals {
            if rule.then.is_empty() {
                return Err(SchemaDefinitionError::EmptyConditional {
                    schema: self.name.clone(),
                    rule: rule.description.clone(),
                });
            }
            let context = format!("conditional rule '{}'", rule.description);
            for field in rule.when.referenced_fields() {
                if !seen.contains(field) {
                    return Err(undeclared(context, field));
                }
            }
            for constraint in &rule.then {
                if !seen.contains(constraint.field.as_str()) {
                    return Err(undeclared(context, &constraint.field));
                }
            }
        }

        Ok(Schema {
            name: self.name,
            fields: self.fields,
            conditionals: self.conditionals,
        })
    }
}
