//! Purchase entry, purchase return and supplier payment forms.

use super::DATE_MESSAGE;
use crate::errors::SchemaDefinitionError;
use crate::schema::{Predicate, Schema};

fn purchase_line() -> Result<Schema, SchemaDefinitionError> {
    Schema::builder("purchaseLine")
        .field("itemId", |f| f.required("Item is required").trim())
        .field("batchNo", |f| f.required("Batch number is required").trim())
        .field("expiryDate", |f| f.required("Expiry date is required").date(DATE_MESSAGE))
        .field("quantity", |f| {
            f.required("Quantity is required")
                .integer("Quantity must be a whole number")
                .positive("Quantity must be positive")
        })
        .field("freeQuantity", |f| {
            f.integer("Free quantity must be a whole number")
                .non_negative("Free quantity cannot be negative")
        })
        .field("purchasePrice", |f| {
            f.required("Purchase price is required")
                .number("Purchase price must be a number")
                .positive("Purchase price must be positive")
        })
        .field("mrp", |f| {
            f.required("MRP is required")
                .number("MRP must be a number")
                .positive("MRP must be positive")
        })
        .field("gst", |f| {
            f.required("GST rate is required")
                .number("GST rate must be a number")
                .min(0.0, "GST rate cannot be negative")
                .max(28.0, "GST rate cannot exceed 28%")
        })
        .build()
}

fn return_line() -> Result<Schema, SchemaDefinitionError> {
    Schema::builder("returnLine")
        .field("itemId", |f| f.required("Item is required").trim())
        .field("batchNo", |f| f.required("Batch number is required").trim())
        .field("quantity", |f| {
            f.required("Quantity is required")
                .integer("Quantity must be a whole number")
                .positive("Quantity must be positive")
        })
        .field("price", |f| {
            f.required("Price is required")
                .number("Price must be a number")
                .positive("Price must be positive")
        })
        .build()
}

/// Purchase invoice entry.
pub fn purchase_entry() -> Result<Schema, SchemaDefinitionError> {
    Schema::builder("purchaseEntry")
        .field("supplierId", |f| f.required("Supplier is required").trim())
        .field("invoiceNo", |f| {
            f.required("Invoice number is required")
                .text("Invoice number must be text")
                .trim()
        })
        .field("invoiceDate", |f| f.required("Invoice date is required").date(DATE_MESSAGE))
        .list("items", purchase_line()?, |f| {
            f.required("Add at least one item")
                .min_items(1, "Add at least one item")
        })
        .field("discount", |f| {
            f.number("Discount must be a number")
                .non_negative("Discount cannot be negative")
        })
        .build()
}

/// Goods returned to a supplier.
pub fn purchase_return() -> Result<Schema, SchemaDefinitionError> {
    Schema::builder("purchaseReturn")
        .field("supplierId", |f| f.required("Supplier is required").trim())
        .field("returnDate", |f| f.required("Return date is required").date(DATE_MESSAGE))
        .field("reason", |f| {
            f.trim().max_len(200, "Reason must be at most 200 characters")
        })
        .list("items", return_line()?, |f| {
            f.required("Add at least one item to return")
                .min_items(1, "Add at least one item to return")
        })
        .build()
}

/// Payment made to a supplier.
pub fn supplier_payment() -> Result<Schema, SchemaDefinitionError> {
    Schema::builder("supplierPayment")
        .field("supplierId", |f| f.required("Supplier is required").trim())
        .field("amount", |f| {
            f.required("Amount is required")
                .number("Amount must be a number")
                .positive("Amount must be positive")
        })
        .field("paymentMode", |f| {
            f.required("Payment mode is required")
                .trim()
                .one_of(&["cash", "upi", "cheque", "bank"], "Select a valid payment mode")
        })
        .field("paymentDate", |f| f.required("Payment date is required").date(DATE_MESSAGE))
        .field("referenceNo", |f| f.text("Reference number must be text").trim())
        .field("remarks", |f| {
            f.trim().max_len(200, "Remarks must be at most 200 characters")
        })
        .when(
            "cheque and bank payments need a reference",
            Predicate::one_of("paymentMode", ["cheque", "bank"]),
            |c| c.require("referenceNo", "Reference number is required for cheque and bank payments"),
        )
        .build()
}
