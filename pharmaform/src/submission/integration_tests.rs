//! End-to-end submission tests: schema, adapter and transport together.

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use super::{FormState, FormSubmission};
use crate::core::{ErrorCode, FormKind};
use crate::errors::{FailureKind, SubmissionError, TransportError};
use crate::testing::{fixtures, input, FailingTransport, RecordingTransport, SlowTransport};
use crate::transport::{
    AuthToken, FormMode, Method, MockTransport, Transport, TransportRequest, TransportResponse,
};

fn billing_form<T: Transport>(transport: Arc<T>) -> FormSubmission<T> {
    FormSubmission::for_form(FormKind::Billing, &FormMode::Create, transport).unwrap()
}

#[tokio::test]
async fn test_valid_bill_is_sent_normalized() {
    let transport = Arc::new(RecordingTransport::new());
    let form = billing_form(Arc::clone(&transport));

    let receipt = form
        .submit(fixtures::valid_billing_input(), Some(AuthToken::new("jwt-1")))
        .await
        .unwrap();

    assert_eq!(form.state(), FormState::Submitted);
    assert_eq!(receipt.response.status, 201);
    assert_eq!(receipt.normalized["receivedAmount"], json!(250));

    let request = transport.last_request().unwrap();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "/billing");
    assert_eq!(request.request_id, receipt.submission_id);
    assert_eq!(request.auth_token, Some(AuthToken::new("jwt-1")));
    assert_eq!(request.body, json!(receipt.normalized));
    assert_eq!(request.body["patientName"], json!("Meera Iyer"));
}

#[tokio::test]
async fn test_invalid_input_never_reaches_transport() {
    let mut mock = MockTransport::new();
    mock.expect_request().never();
    let form = billing_form(Arc::new(mock));

    let err = form
        .submit(
            input(json!({
                "patientName": "",
                "patientId1": "P1",
                "patientType": "OPD",
                "doctorId": "D1",
                "paymentStatus": "paid"
            })),
            None,
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::ValidationError);
    let errors = err.field_errors().unwrap();
    assert_eq!(errors.paths(), vec!["patientName", "paymentType"]);
    assert_eq!(errors.get("paymentType").unwrap().code, ErrorCode::Required);
    assert_eq!(form.state(), FormState::Editing);

    let failure = err.to_failure();
    assert_eq!(failure.message, "2 field(s) need attention");
    assert_eq!(failure.field_errors.len(), 2);
}

#[tokio::test]
async fn test_mock_transport_sees_update_request() {
    let mut mock = MockTransport::new();
    mock.expect_request()
        .withf(|request: &TransportRequest| {
            request.method == Method::Put
                && request.path == "/items/ITM-9"
                && request.body["gst"] == json!(12)
                && request.auth_token.is_none()
        })
        .times(1)
        .returning(|request| Ok(TransportResponse::ok(json!({"data": request.body}))));

    let form = FormSubmission::for_form(
        FormKind::Item,
        &FormMode::Update("ITM-9".into()),
        Arc::new(mock),
    )
    .unwrap();

    let receipt = form.submit(fixtures::valid_item_input(), None).await.unwrap();
    assert_eq!(receipt.response.data().unwrap()["packSize"], json!(10));
}

#[tokio::test]
async fn test_non_success_response_is_transport_error() {
    let transport = Arc::new(RecordingTransport::new().with_response(Ok(TransportResponse::new(
        409,
        json!({"message": "Invoice already recorded"}),
    ))));
    let form = FormSubmission::for_form(FormKind::PurchaseEntry, &FormMode::Create, transport).unwrap();

    let err = form
        .submit(fixtures::valid_purchase_entry_input(), None)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SubmissionError::Transport(TransportError::status(409, "Invoice already recorded"))
    );
    let failure = err.to_failure();
    assert_eq!(failure.kind, FailureKind::TransportError);
    assert_eq!(failure.status, Some(409));
    assert_eq!(failure.message, "Invoice already recorded");
    assert_eq!(form.state(), FormState::Editing);
}

#[tokio::test]
async fn test_transport_failure_is_not_retried() {
    let transport = Arc::new(FailingTransport::network("connection reset"));
    let form = billing_form(Arc::clone(&transport));

    let err = form
        .submit(fixtures::valid_billing_input(), None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::TransportError);
    assert!(err.field_errors().is_none());
    assert_eq!(transport.call_count(), 1);
    assert_eq!(form.state(), FormState::Editing);

    let _ = form.submit(fixtures::valid_billing_input(), None).await;
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_rejected() {
    let transport = Arc::new(SlowTransport::with_delay_ms(100));
    let form = Arc::new(billing_form(Arc::clone(&transport)));

    let first = {
        let form = Arc::clone(&form);
        tokio::spawn(async move { form.submit(fixtures::valid_billing_input(), None).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(form.state(), FormState::AwaitingTransport);

    let second = form.submit(fixtures::valid_billing_input(), None).await;
    assert_eq!(second.unwrap_err(), SubmissionError::InFlight);
    assert_eq!(form.state(), FormState::AwaitingTransport);

    let receipt = first.await.unwrap().unwrap();
    assert_eq!(receipt.response.status, 200);
    assert_eq!(transport.started(), 1);
    assert_eq!(form.state(), FormState::Submitted);
}

#[tokio::test]
async fn test_teardown_discards_in_flight_result() {
    let transport = Arc::new(SlowTransport::with_delay_ms(500));
    let form = Arc::new(billing_form(Arc::clone(&transport)));

    let pending = {
        let form = Arc::clone(&form);
        tokio::spawn(async move { form.submit(fixtures::valid_billing_input(), None).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    form.teardown();

    let result = tokio::time::timeout(Duration::from_millis(200), pending)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(result.unwrap_err(), SubmissionError::Cancelled);
    assert_eq!(form.state(), FormState::TornDown);
    assert_eq!(transport.started(), 1);
    assert_eq!(transport.completed(), 0);

    let later = form.submit(fixtures::valid_billing_input(), None).await;
    assert_eq!(later.unwrap_err().kind(), FailureKind::Cancelled);
    assert_eq!(transport.started(), 1);
}

#[tokio::test]
async fn test_submitted_form_can_submit_again() {
    let transport = Arc::new(RecordingTransport::new());
    let form = billing_form(Arc::clone(&transport));

    form.submit(fixtures::valid_billing_input(), None).await.unwrap();
    let mut edited = fixtures::valid_billing_input();
    edited.insert("receivedAmount".to_string(), json!(-1));

    let err = form.submit(edited, None).await.unwrap_err();
    assert_eq!(err.field_errors().unwrap().paths(), vec!["receivedAmount"]);
    assert_eq!(form.state(), FormState::Editing);
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_forms_share_a_dyn_transport() {
    let recording = Arc::new(RecordingTransport::new());
    let transport: Arc<dyn Transport> = recording.clone();

    let payment = FormSubmission::for_form(FormKind::SupplierPayment, &FormMode::Create, Arc::clone(&transport)).unwrap();
    let login = FormSubmission::for_form(FormKind::Login, &FormMode::Create, transport).unwrap();

    payment.submit(fixtures::valid_supplier_payment_input(), None).await.unwrap();
    login.submit(fixtures::valid_login_input(), None).await.unwrap();

    let paths: Vec<_> = recording.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["/supplier-payments", "/auth/login"]);
    assert_eq!(payment.state(), FormState::Submitted);
    assert_eq!(login.state(), FormState::Submitted);
}

#[tokio::test]
async fn test_dropped_submit_returns_form_to_editing() {
    let transport = Arc::new(SlowTransport::with_delay_ms(200));
    let form = billing_form(Arc::clone(&transport));

    let timed_out = tokio::time::timeout(
        Duration::from_millis(20),
        form.submit(fixtures::valid_billing_input(), None),
    )
    .await;
    assert!(timed_out.is_err());
    assert_eq!(transport.started(), 1);
    assert_eq!(transport.completed(), 0);
    assert_eq!(form.state(), FormState::Editing);
    assert!(form.reset());

    let receipt = form.submit(fixtures::valid_billing_input(), None).await.unwrap();
    assert_eq!(receipt.response.status, 200);
    assert_eq!(transport.started(), 2);
    assert_eq!(form.state(), FormState::Submitted);
}

#[tokio::test]
async fn test_dropped_submit_after_teardown_stays_torn_down() {
    let transport = Arc::new(SlowTransport::with_delay_ms(200));
    let form = Arc::new(billing_form(Arc::clone(&transport)));

    let pending = {
        let form = Arc::clone(&form);
        tokio::spawn(async move { form.submit(fixtures::valid_billing_input(), None).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    form.teardown();
    pending.abort();
    let _ = pending.await;

    assert_eq!(form.state(), FormState::TornDown);
}
