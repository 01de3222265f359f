//! Registry of named, immutable schemas.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use super::{entities, Schema};
use crate::core::FormKind;
use crate::errors::SchemaDefinitionError;

static BUILTIN: LazyLock<SchemaRegistry> = LazyLock::new(|| {
    match entities::all().and_then(SchemaRegistry::try_from_schemas) {
        Ok(registry) => registry,
        Err(err) => panic!("built-in schema definitions are malformed: {err}"),
    }
});

/// Named schemas, fixed at construction.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Arc<Schema>>,
}

impl SchemaRegistry {
    /// The entity schemas shipped with the crate.
    ///
    /// Built on first access. A malformed built-in definition is a
    /// programming error and panics here.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Builds a registry from a set of schemas.
    pub fn try_from_schemas(
        schemas: impl IntoIterator<Item = Schema>,
    ) -> Result<Self, SchemaDefinitionError> {
        let mut map = BTreeMap::new();
        for schema in schemas {
            let name = schema.name().to_string();
            if map.contains_key(&name) {
                return Err(SchemaDefinitionError::DuplicateSchema { name });
            }
            map.insert(name, Arc::new(schema));
        }
        Ok(Self { schemas: map })
    }

    /// Fetches a schema by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Schema>> {
        self.schemas.get(name).cloned()
    }

    /// Fetches the schema registered for a form.
    #[must_use]
    pub fn schema(&self, kind: FormKind) -> Option<Arc<Schema>> {
        self.get(kind.schema_name())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
