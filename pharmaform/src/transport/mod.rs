//! Boundary to the remote REST API.

mod config;
mod endpoints;
#[cfg(feature = "http")]
mod http;
mod interfaces;

pub use config::{TransportConfig, API_URL_ENV, TIMEOUT_ENV};
pub use endpoints::{Endpoint, FormMode};
#[cfg(feature = "http")]
pub use http::HttpTransport;
#[cfg(test)]
pub use interfaces::MockTransport;
pub use interfaces::{AuthToken, Method, Transport, TransportRequest, TransportResponse};
