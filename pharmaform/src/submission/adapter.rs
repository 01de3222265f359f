//! Form submission state machine.

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::FormState;
use crate::cancellation::CancellationToken;
use crate::core::{FormKind, ValidationResult};
use crate::errors::{PharmaformError, SubmissionError, TransportError};
use crate::observability::SpanTimer;
use crate::schema::{Schema, SchemaRegistry};
use crate::transport::{
    AuthToken, Endpoint, FormMode, Transport, TransportRequest, TransportResponse,
};

/// What a successful submission produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionReceipt {
    /// Id of this submission, also sent as the request id.
    pub submission_id: Uuid,
    /// The server's answer.
    pub response: TransportResponse,
    /// The validated value that was sent.
    pub normalized: Map<String, Value>,
    /// Validation plus transport time.
    pub duration_ms: u64,
}

/// One form instance: validates a snapshot, then hands it to the transport.
///
/// At most one submission runs at a time; a submit while another is
/// validating or awaiting the transport fails with
/// [`SubmissionError::InFlight`] and leaves the running one untouched.
/// After [`teardown`](Self::teardown) every pending or later submit
/// resolves to [`SubmissionError::Cancelled`] without touching state.
pub struct FormSubmission<T: Transport + ?Sized> {
    schema: Arc<Schema>,
    endpoint: Endpoint,
    transport: Arc<T>,
    state: Mutex<FormState>,
    cancel: CancellationToken,
}

impl<T: Transport + ?Sized> FormSubmission<T> {
    /// Creates a form instance from its parts.
    #[must_use]
    pub fn new(schema: Arc<Schema>, endpoint: Endpoint, transport: Arc<T>) -> Self {
        Self {
            schema,
            endpoint,
            transport,
            state: Mutex::new(FormState::Editing),
            cancel: CancellationToken::new(),
        }
    }

    /// Creates an instance for a built-in form.
    pub fn for_form(kind: FormKind, mode: &FormMode, transport: Arc<T>) -> Result<Self, PharmaformError> {
        let schema = SchemaRegistry::builtin()
            .schema(kind)
            .ok_or_else(|| PharmaformError::UnknownSchema(kind.schema_name().to_string()))?;
        let endpoint = Endpoint::for_form(kind, mode)?;
        Ok(Self::new(schema, endpoint, transport))
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FormState {
        *self.state.lock()
    }

    /// The schema this form validates against.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Where valid input is sent.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Whether the instance has been torn down.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Validates without submitting or changing state.
    #[must_use]
    pub fn validate(&self, input: &Map<String, Value>) -> ValidationResult {
        self.schema.validate(input)
    }

    /// Validates `input` and, when it is valid, sends it.
    ///
    /// The token is passed to the transport as-is and never stored.
    pub async fn submit(
        &self,
        input: Map<String, Value>,
        auth: Option<AuthToken>,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let submission_id = Uuid::new_v4();
        let span = info_span!(
            "form_submission",
            schema = self.schema.name(),
            %submission_id,
        );
        self.run(submission_id, input, auth).instrument(span).await
    }

    async fn run(
        &self,
        submission_id: Uuid,
        input: Map<String, Value>,
        auth: Option<AuthToken>,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        self.begin()?;
        let guard = InFlightGuard::new(self);
        let timer = SpanTimer::start("form_submission");

        let normalized = match self.schema.validate(&input).into_result() {
            Ok(value) => value,
            Err(errors) => {
                guard.finish(FormState::Editing)?;
                warn!(errors = errors.len(), paths = ?errors.paths(), "submission rejected");
                return Err(SubmissionError::Validation(errors));
            }
        };

        self.transition(FormState::AwaitingTransport)?;
        let request = TransportRequest::new(
            self.endpoint.method,
            self.endpoint.path.clone(),
            Value::Object(normalized.clone()),
        )
        .with_auth(auth)
        .with_request_id(submission_id);

        let outcome = tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                debug!("form torn down while awaiting transport, discarding result");
                return Err(SubmissionError::Cancelled);
            }
            outcome = self.transport.request(request) => outcome,
        };

        let outcome = outcome.and_then(|response| {
            if response.is_success() {
                Ok(response)
            } else {
                Err(TransportError::from_response(&response))
            }
        });

        match outcome {
            Ok(response) => {
                guard.finish(FormState::Submitted)?;
                let duration_ms = timer.elapsed_whole_ms();
                info!(status = response.status, duration_ms, "submission accepted");
                Ok(SubmissionReceipt {
                    submission_id,
                    response,
                    normalized,
                    duration_ms,
                })
            }
            Err(err) => {
                guard.finish(FormState::Editing)?;
                warn!(
                    status = ?err.status_code(),
                    error = %err,
                    duration_ms = timer.elapsed_whole_ms(),
                    "submission failed in transport"
                );
                Err(SubmissionError::Transport(err))
            }
        }
    }

    fn begin(&self) -> Result<(), SubmissionError> {
        let mut state = self.state.lock();
        let current = *state;
        if self.cancel.is_cancelled() {
            return Err(SubmissionError::Cancelled);
        }
        if !current.accepts_submit() {
            debug!(state = %current, "submit ignored, another submission is running");
            return Err(SubmissionError::InFlight);
        }
        debug!(from = %current, to = %FormState::Validating, "form state changed");
        *state = FormState::Validating;
        Ok(())
    }

    /// Moves to `next` unless the instance was torn down meanwhile.
    fn transition(&self, next: FormState) -> Result<(), SubmissionError> {
        let mut state = self.state.lock();
        if self.cancel.is_cancelled() {
            return Err(SubmissionError::Cancelled);
        }
        let current = *state;
        debug!(from = %current, to = %next, "form state changed");
        *state = next;
        Ok(())
    }

    /// Tears the instance down.
    ///
    /// A submission awaiting the transport resolves to
    /// [`SubmissionError::Cancelled`] and its result is discarded.
    pub fn teardown(&self) {
        let mut state = self.state.lock();
        let current = *state;
        if self.cancel.cancel("form torn down") {
            debug!(schema = self.schema.name(), from = %current, "form torn down");
        }
        *state = FormState::TornDown;
    }

    /// Returns an idle instance to `Editing`.
    ///
    /// Returns `false` while a submission is running or after teardown.
    pub fn reset(&self) -> bool {
        let mut state = self.state.lock();
        if state.is_busy() || self.cancel.is_cancelled() {
            return false;
        }
        *state = FormState::Editing;
        true
    }
}

/// Returns the form to `Editing` if a running submission is dropped
/// before it reaches a final state.
struct InFlightGuard<'a> {
    state: &'a Mutex<FormState>,
    cancel: &'a CancellationToken,
    armed: bool,
}

impl<'a> InFlightGuard<'a> {
    fn new<T: Transport + ?Sized>(form: &'a FormSubmission<T>) -> Self {
        Self {
            state: &form.state,
            cancel: &form.cancel,
            armed: true,
        }
    }

    /// Moves to the final state of this submission and disarms.
    fn finish(mut self, next: FormState) -> Result<(), SubmissionError> {
        self.armed = false;
        let mut state = self.state.lock();
        if self.cancel.is_cancelled() {
            return Err(SubmissionError::Cancelled);
        }
        let current = *state;
        debug!(from = %current, to = %next, "form state changed");
        *state = next;
        Ok(())
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock();
        if self.cancel.is_cancelled() || !state.is_busy() {
            return;
        }
        let current = *state;
        debug!(from = %current, "submission dropped before completing, back to editing");
        *state = FormState::Editing;
    }
}

impl<T: Transport + ?Sized> std::fmt::Debug for FormSubmission<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSubmission")
            .field("schema", &self.schema.name())
            .field("endpoint", &self.endpoint)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
