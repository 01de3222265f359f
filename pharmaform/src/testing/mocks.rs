//! Transport doubles for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::TransportError;
use crate::transport::{Transport, TransportRequest, TransportResponse};

/// A transport that records every request and replays scripted answers.
///
/// Once the script is exhausted it answers `201 Created`.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<TransportRequest>>,
    script: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
}

impl RecordingTransport {
    /// Creates a new recording transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an answer for the next unanswered request.
    #[must_use]
    pub fn with_response(self, response: Result<TransportResponse, TransportError>) -> Self {
        self.push_response(response);
        self
    }

    /// Queues an answer for the next unanswered request.
    pub fn push_response(&self, response: Result<TransportResponse, TransportError>) {
        self.script.lock().push_back(response);
    }

    /// Returns all recorded requests.
    #[must_use]
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().clone()
    }

    /// Returns the number of requests.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Returns the most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<TransportRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().push(request);
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(TransportResponse::new(201, json!({"message": "Created"}))))
    }
}

/// A transport that always fails.
#[derive(Debug)]
pub struct FailingTransport {
    error: TransportError,
    calls: AtomicUsize,
}

impl FailingTransport {
    /// Creates a transport failing with `error`.
    #[must_use]
    pub fn new(error: TransportError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails every request with a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(TransportError::network(message))
    }

    /// Fails every request with a status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::new(TransportError::status(status, message))
    }

    /// Returns the number of calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for FailingTransport {
    async fn request(&self, _request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

/// A transport that takes time to answer.
#[derive(Debug)]
pub struct SlowTransport {
    delay: Duration,
    started: AtomicUsize,
    completed: AtomicUsize,
}

impl SlowTransport {
    /// Creates a new slow transport.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            started: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    /// Creates a slow transport with delay in milliseconds.
    #[must_use]
    pub fn with_delay_ms(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Requests that have started.
    #[must_use]
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Requests that ran to completion.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for SlowTransport {
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(TransportResponse::ok(json!({"data": request.body})))
    }
}
