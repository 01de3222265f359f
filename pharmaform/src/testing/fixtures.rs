//! Form inputs for tests and benchmarks.

use serde_json::{json, Map, Value};

/// Converts a `json!` object literal into a form input map.
///
/// Panics on anything that is not an object.
#[must_use]
pub fn input(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("form input must be a JSON object, got {other}"),
    }
}

/// A sign-in that passes validation.
#[must_use]
pub fn valid_login_input() -> Map<String, Value> {
    input(json!({
        "email": "owner@pharmacy.in",
        "password": "secret1"
    }))
}

/// An item master record that passes validation.
#[must_use]
pub fn valid_item_input() -> Map<String, Value> {
    input(json!({
        "itemName": "Paracetamol 500",
        "category": "Tablet",
        "manufacturer": "Cipla",
        "hsnCode": "3004",
        "gst": "12",
        "packSize": 10
    }))
}

/// A paid cash bill with one line that passes validation.
///
/// Amounts are numeric strings and the patient name is padded, so the
/// normalized value differs from the input.
#[must_use]
pub fn valid_billing_input() -> Map<String, Value> {
    input(json!({
        "patientName": " Meera Iyer ",
        "patientId1": "P-1001",
        "patientType": "OPD",
        "doctorId": "D-7",
        "paymentStatus": "paid",
        "paymentType": "cash",
        "receivedAmount": "250",
        "items": [
            {"itemId": "ITM-1", "batchNo": "B123", "quantity": "2", "price": "125"}
        ]
    }))
}

/// A purchase invoice with one line that passes validation.
#[must_use]
pub fn valid_purchase_entry_input() -> Map<String, Value> {
    input(json!({
        "supplierId": "SUP-1",
        "invoiceNo": "INV-2026-001",
        "invoiceDate": "2026-03-31",
        "items": [{
            "itemId": "ITM-1",
            "batchNo": "B123",
            "expiryDate": "2027-03-31",
            "quantity": "10",
            "purchasePrice": "42.5",
            "mrp": 60,
            "gst": "12"
        }]
    }))
}

/// A purchase return that passes validation.
#[must_use]
pub fn valid_purchase_return_input() -> Map<String, Value> {
    input(json!({
        "supplierId": "SUP-1",
        "returnDate": "2026-04-02",
        "reason": "Damaged strips",
        "items": [{"itemId": "ITM-1", "batchNo": "B123", "quantity": 2, "price": 42.5}]
    }))
}

/// A cash supplier payment that passes validation.
#[must_use]
pub fn valid_supplier_payment_input() -> Map<String, Value> {
    input(json!({
        "supplierId": "SUP-1",
        "amount": "1500",
        "paymentMode": "cash",
        "paymentDate": "2026-04-05"
    }))
}
