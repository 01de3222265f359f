//! Benchmarks for form validation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pharmaform::core::FormKind;
use pharmaform::schema::SchemaRegistry;
use pharmaform::testing::fixtures;
use serde_json::json;

fn validation_benchmark(c: &mut Criterion) {
    let registry = SchemaRegistry::builtin();
    let billing = registry.schema(FormKind::Billing).expect("billing schema");
    let purchase = registry.schema(FormKind::PurchaseEntry).expect("purchase schema");

    let valid_bill = fixtures::valid_billing_input();
    c.bench_function("billing_valid", |b| {
        b.iter(|| black_box(billing.validate(black_box(&valid_bill))))
    });

    let mut split_bill = fixtures::valid_billing_input();
    split_bill.insert("paymentType".to_string(), json!("upiCash"));
    split_bill.insert("upi".to_string(), json!(0));
    split_bill.insert("cash".to_string(), json!("50"));
    c.bench_function("billing_conditional_errors", |b| {
        b.iter(|| black_box(billing.validate(black_box(&split_bill))))
    });

    let mut large_purchase = fixtures::valid_purchase_entry_input();
    let line = large_purchase["items"][0].clone();
    large_purchase.insert("items".to_string(), json!(vec![line; 100]));
    c.bench_function("purchase_entry_100_lines", |b| {
        b.iter(|| black_box(purchase.validate(black_box(&large_purchase))))
    });
}

criterion_group!(benches, validation_benchmark);
criterion_main!(benches);
