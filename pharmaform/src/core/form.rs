//! Catalog of the application's entity forms.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The forms the application submits to the REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormKind {
    /// Sign-in form.
    Login,
    /// New account sign-up form.
    Registration,
    /// Staff user management.
    User,
    /// Prescribing doctors.
    Doctor,
    /// Inventory item master.
    Item,
    /// Supplier master.
    Supplier,
    /// Purchase invoice entry with line items.
    PurchaseEntry,
    /// Goods returned to a supplier.
    PurchaseReturn,
    /// Patient bill.
    Billing,
    /// Payment made to a supplier.
    SupplierPayment,
}

impl FormKind {
    /// Every form, in catalog order.
    pub const ALL: [Self; 10] = [
        Self::Login,
        Self::Registration,
        Self::User,
        Self::Doctor,
        Self::Item,
        Self::Supplier,
        Self::PurchaseEntry,
        Self::PurchaseReturn,
        Self::Billing,
        Self::SupplierPayment,
    ];

    /// Name of the schema registered for this form.
    #[must_use]
    pub fn schema_name(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Registration => "registration",
            Self::User => "user",
            Self::Doctor => "doctor",
            Self::Item => "item",
            Self::Supplier => "supplier",
            Self::PurchaseEntry => "purchaseEntry",
            Self::PurchaseReturn => "purchaseReturn",
            Self::Billing => "billing",
            Self::SupplierPayment => "supplierPayment",
        }
    }

    /// REST collection the form posts to.
    #[must_use]
    pub fn collection_path(self) -> &'static str {
        match self {
            Self::Login => "/auth/login",
            Self::Registration => "/auth/register",
            Self::User => "/users",
            Self::Doctor => "/doctors",
            Self::Item => "/items",
            Self::Supplier => "/suppliers",
            Self::PurchaseEntry => "/purchases",
            Self::PurchaseReturn => "/purchase-returns",
            Self::Billing => "/billing",
            Self::SupplierPayment => "/supplier-payments",
        }
    }

    /// Whether existing records can be edited through this form.
    #[must_use]
    pub fn supports_update(self) -> bool {
        !matches!(self, Self::Login | Self::Registration)
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_schema_names_are_unique() {
        let names: HashSet<_> = FormKind::ALL.iter().map(|k| k.schema_name()).collect();
        assert_eq!(names.len(), FormKind::ALL.len());
    }

    #[test]
    fn test_auth_forms_are_create_only() {
        assert!(!FormKind::Login.supports_update());
        assert!(!FormKind::Registration.supports_update());
        assert!(FormKind::Billing.supports_update());
    }

    #[test]
    fn test_serde_uses_schema_names() {
        let json = serde_json::to_value(FormKind::PurchaseEntry).unwrap();
        assert_eq!(json, serde_json::json!("purchaseEntry"));
    }
}
