//! Schemas for the application's entity forms.

mod auth;
mod billing;
mod masters;
mod purchase;

pub use auth::{login, registration, user};
pub use billing::billing;
pub use masters::{doctor, item, supplier};
pub use purchase::{purchase_entry, purchase_return, supplier_payment};

use super::Schema;
use crate::errors::SchemaDefinitionError;

/// Every entity schema, in [`FormKind::ALL`](crate::core::FormKind::ALL) order.
pub fn all() -> Result<Vec<Schema>, SchemaDefinitionError> {
    Ok(vec![
        login()?,
        registration()?,
        user()?,
        doctor()?,
        item()?,
        supplier()?,
        purchase_entry()?,
        purchase_return()?,
        billing()?,
        supplier_payment()?,
    ])
}

pub(crate) const MOBILE_MESSAGE: &str = "Enter a valid 10-digit mobile number";
pub(crate) const EMAIL_MESSAGE: &str = "Enter a valid email address";
pub(crate) const DATE_MESSAGE: &str = "Enter a valid date (YYYY-MM-DD)";
