//! Doctor, item and supplier master forms.

use super::{EMAIL_MESSAGE, MOBILE_MESSAGE};
use crate::errors::SchemaDefinitionError;
use crate::schema::Schema;

const GSTIN_PATTERN: &str = r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$";
const HSN_PATTERN: &str = r"^[0-9]{4,8}$";

/// Prescribing doctor.
pub fn doctor() -> Result<Schema, SchemaDefinitionError> {
    Schema::builder("doctor")
        .field("name", |f| {
            f.required("Doctor name is required")
                .trim()
                .min_len(2, "Doctor name must be at least 2 characters")
        })
        .field("specialization", |f| {
            f.required("Specialization is required").trim()
        })
        .field("mobile", |f| f.required("Mobile number is required").phone(MOBILE_MESSAGE))
        .field("email", |f| f.trim().email(EMAIL_MESSAGE))
        .field("registrationNo", |f| {
            f.text("Registration number must be text")
                .trim()
                .max_len(30, "Registration number must be at most 30 characters")
        })
        .field("consultationFee", |f| {
            f.number("Consultation fee must be a number")
                .non_negative("Consultation fee cannot be negative")
        })
        .build()
}

/// Inventory item master.
pub fn item() -> Result<Schema, SchemaDefinitionError> {
    Schema::builder("item")
        .field("itemName", |f| {
            f.required("Item name is required")
                .trim()
                .min_len(2, "Item name must be at least 2 characters")
        })
        .field("category", |f| f.required("Category is required").trim())
        .field("manufacturer", |f| f.trim())
        .field("hsnCode", |f| {
            f.text("HSN code must be text")
                .trim()
                .pattern(HSN_PATTERN, "HSN code must be 4 to 8 digits")
        })
        .field("gst", |f| {
            f.required("GST rate is required")
                .number("GST rate must be a number")
                .min(0.0, "GST rate cannot be negative")
                .max(28.0, "GST rate cannot exceed 28%")
        })
        .field("packSize", |f| {
            f.required("Pack size is required")
                .integer("Pack size must be a whole number")
                .positive("Pack size must be positive")
        })
        .field("minStock", |f| {
            f.integer("Minimum stock must be a whole number")
                .non_negative("Minimum stock cannot be negative")
        })
        .field("rackNo", |f| f.text("Rack number must be text").trim())
        .build()
}

/// Supplier master.
pub fn supplier() -> Result<Schema, SchemaDefinitionError> {
    Schema::builder("supplier")
        .field("supplierName", |f| {
            f.required("Supplier name is required")
                .trim()
                .min_len(2, "Supplier name must be at least 2 characters")
        })
        .field("mobile", |f| f.required("Mobile number is required").phone(MOBILE_MESSAGE))
        .field("email", |f| f.trim().email(EMAIL_MESSAGE))
        .field("gstNumber", |f| {
            f.trim().pattern(GSTIN_PATTERN, "Enter a valid 15-character GSTIN")
        })
        .field("address", |f| {
            f.required("Address is required")
                .trim()
                .max_len(250, "Address must be at most 250 characters")
        })
        .field("openingBalance", |f| {
            f.number("Opening balance must be a number")
                .non_negative("Opening balance cannot be negative")
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorCode;
    use crate::testing::{assert_error_paths, assert_field_error, assert_valid, input};
    use serde_json::json;

    #[test]
    fn test_doctor_optional_fields_skip_when_blank() {
        let schema = doctor().unwrap();
        let value = assert_valid(&schema.validate(&input(json!({
            "name": "Dr. Mehta",
            "specialization": "Cardiology",
            "mobile": "+91 98200-12345",
            "email": "",
            "consultationFee": "500"
        }))));
        assert_eq!(value["mobile"], json!("9820012345"));
        assert_eq!(value["consultationFee"], json!(500));
        assert!(!value.contains_key("email"));
    }

    #[test]
    fn test_item_numeric_rules() {
        let schema = item().unwrap();
        let result = schema.validate(&input(json!({
            "itemName": "Paracetamol 500",
            "category": "Tablet",
            "hsnCode": "30049",
            "gst": "40",
            "packSize": "2.5",
            "minStock": -1
        })));
        assert_error_paths(&result, &["gst", "packSize", "minStock"]);
        assert_field_error(&result, "gst", ErrorCode::TooBig);
        assert_field_error(&result, "packSize", ErrorCode::InvalidType);
        assert_field_error(&result, "minStock", ErrorCode::TooSmall);
    }

    #[test]
    fn test_item_hsn_accepts_numbers() {
        let schema = item().unwrap();
        let value = assert_valid(&schema.validate(&input(json!({
            "itemName": "Amoxicillin",
            "category": "Capsule",
            "hsnCode": 3004,
            "gst": 12,
            "packSize": "10"
        }))));
        assert_eq!(value["hsnCode"], json!("3004"));
        assert_eq!(value["packSize"], json!(10));
    }

    #[test]
    fn test_supplier_gstin() {
        let schema = supplier().unwrap();
        let base = json!({
            "supplierName": "Medline Distributors",
            "mobile": "9123456780",
            "address": "12 MG Road, Pune",
            "gstNumber": "27AAPFU0939F1ZV"
        });
        assert_valid(&schema.validate(&input(base.clone())));

        let mut bad = base;
        bad["gstNumber"] = json!("27AAPFU0939F1Z");
        let result = schema.validate(&input(bad));
        assert_field_error(&result, "gstNumber", ErrorCode::Pattern);
    }

    #[test]
    fn test_codes_require_ascii_digits() {
        let supplier = supplier().unwrap();
        let result = supplier.validate(&input(json!({
            "supplierName": "Medline Distributors",
            "mobile": "9123456780",
            "address": "12 MG Road, Pune",
            "gstNumber": "\u{968}\u{967}AAPFU0939F1ZV"
        })));
        assert_error_paths(&result, &["gstNumber"]);

        let item = item().unwrap();
        let result = item.validate(&input(json!({
            "itemName": "Amoxicillin",
            "category": "Capsule",
            "hsnCode": "\u{969}\u{966}\u{966}\u{96a}",
            "gst": 12,
            "packSize": "10"
        })));
        assert_field_error(&result, "hsnCode", ErrorCode::Pattern);
    }
}
