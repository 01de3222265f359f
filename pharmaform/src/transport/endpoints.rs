//! Maps forms to REST endpoints.

use serde::{Deserialize, Serialize};

use super::Method;
use crate::core::FormKind;
use crate::errors::PharmaformError;

/// Whether a form creates a record or edits an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    /// New record.
    #[default]
    Create,
    /// Existing record with this id.
    Update(String),
}

/// Method and path a form submits to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the API base URL.
    pub path: String,
}

impl Endpoint {
    /// Resolves the endpoint for a form in the given mode.
    ///
    /// Auth forms are create-only; asking for their update endpoint fails.
    pub fn for_form(kind: FormKind, mode: &FormMode) -> Result<Self, PharmaformError> {
        let base = kind.collection_path();
        match mode {
            FormMode::Create => Ok(Self {
                method: Method::Post,
                path: base.to_string(),
            }),
            FormMode::Update(_) if !kind.supports_update() => {
                Err(PharmaformError::UnsupportedMode(kind.to_string()))
            }
            FormMode::Update(id) => Ok(Self {
                method: Method::Put,
                path: format!("{base}/{}", id.trim()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_endpoints() {
        let expected = [
            (FormKind::Login, "/auth/login"),
            (FormKind::Registration, "/auth/register"),
            (FormKind::User, "/users"),
            (FormKind::Doctor, "/doctors"),
            (FormKind::Item, "/items"),
            (FormKind::Supplier, "/suppliers"),
            (FormKind::PurchaseEntry, "/purchases"),
            (FormKind::PurchaseReturn, "/purchase-returns"),
            (FormKind::Billing, "/billing"),
            (FormKind::SupplierPayment, "/supplier-payments"),
        ];
        for (kind, path) in expected {
            let endpoint = Endpoint::for_form(kind, &FormMode::Create).unwrap();
            assert_eq!(endpoint.method, Method::Post);
            assert_eq!(endpoint.path, path);
        }
    }

    #[test]
    fn test_update_endpoint() {
        let endpoint = Endpoint::for_form(FormKind::Item, &FormMode::Update("42".into())).unwrap();
        assert_eq!(endpoint.method, Method::Put);
        assert_eq!(endpoint.path, "/items/42");
    }

    #[test]
    fn test_auth_forms_reject_update() {
        let err = Endpoint::for_form(FormKind::Login, &FormMode::Update("1".into())).unwrap_err();
        assert!(matches!(err, PharmaformError::UnsupportedMode(ref name) if name == "login"));
    }
}
