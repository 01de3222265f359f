//! Patient billing form.
//!
//! Payment fields depend on each other: a paid bill needs a payment type,
//! cash bills need the amount received, and split UPI/cash bills need both
//! parts.

use crate::errors::SchemaDefinitionError;
use crate::schema::{Predicate, Schema};

fn bill_line() -> Result<Schema, SchemaDefinitionError> {
    Schema::builder("billLine")
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

/// Patient bill with payment details.
pub fn billing() -> Result<Schema, SchemaDefinitionError> {
    Schema::builder("billing")
        .field("patientName", |f| {
            f.required("Patient name is required")
                .trim()
                .min_len(2, "Patient name must be at least 2 characters")
        })
        .field("patientId1", |f| {
            f.required("Patient ID is required")
                .text("Patient ID must be text")
                .trim()
        })
        .field("patientType", |f| {
            f.required("Patient type is required")
                .trim()
                .one_of(&["OPD", "IPD"], "Patient type must be OPD or IPD")
        })
        .field("doctorId", |f| f.required("Doctor is required").text("Doctor is required").trim())
        .field("paymentStatus", |f| {
            f.required("Payment status is required")
                .trim()
                .one_of(&["paid", "unpaid", "partial"], "Select a valid payment status")
        })
        .field("paymentType", |f| {
            f.trim()
                .one_of(&["cash", "upi", "card", "upiCash"], "Select a valid payment type")
        })
        .field("receivedAmount", |f| {
            f.number("Received amount must be a number")
                .non_negative("Received amount cannot be negative")
        })
        .field("upi", |f| {
            f.number("UPI amount must be a number")
                .non_negative("UPI amount cannot be negative")
        })
        .field("cash", |f| {
            f.number("Cash amount must be a number")
                .non_negative("Cash amount cannot be negative")
        })
        .field("discount", |f| {
            f.number("Discount must be a number")
                .non_negative("Discount cannot be negative")
        })
        .list("items", bill_line()?, |f| f.min_items(1, "Add at least one item"))
        .when(
            "paid bills need a payment type",
            Predicate::equals("paymentStatus", "paid"),
            |c| c.require("paymentType", "Payment type is required"),
        )
        .when(
            "cash payments need the amount received",
            Predicate::equals("paymentType", "cash"),
            |c| {
                c.check("receivedAmount", |f| {
                    f.required("Received amount is required")
                        .positive("Received amount must be positive")
                })
            },
        )
        .when(
            "split payments need a UPI part",
            Predicate::equals("paymentType", "upiCash"),
            |c| {
                c.check("upi", |f| {
                    f.required("UPI amount is required")
                        .positive("UPI amount must be positive")
                })
            },
        )
        .when(
            "split payments need a cash part",
            Predicate::equals("paymentType", "upiCash"),
            |c| {
                c.check("cash", |f| {
                    f.required("Cash amount is required")
                        .positive("Cash amount must be positive")
                })
            },
        )
        .build()
}
