//! reqwest-backed transport.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, warn};

use super::{Method, Transport, TransportConfig, TransportRequest, TransportResponse};
use crate::errors::TransportError;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Sends form requests to the pharmacy REST API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Builds a client from the configuration.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                TransportError::configuration(format!("invalid header name '{key}': {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                TransportError::configuration(format!("invalid value for header '{key}': {e}"))
            })?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| TransportError::configuration(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Builds a client from `PHARMAFORM_*` environment variables.
    pub fn from_env() -> Result<Self, TransportError> {
        Self::new(TransportConfig::from_env()?)
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = self.config.url_for(&request.path);
        let started = Instant::now();

        let mut builder = match request.method {
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
        };
        builder = builder
            .header(REQUEST_ID_HEADER, request.request_id.to_string())
            .json(&request.body);
        if let Some(token) = &request.auth_token {
            builder = builder.header(AUTHORIZATION, token.bearer());
        }

        let response = builder.send().await.map_err(|e| {
            warn!(url = %url, request_id = %request.request_id, error = %e, "request failed");
            TransportError::network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::decode(e.to_string()))?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| TransportError::decode(e.to_string()))?
        };

        debug!(
            method = %request.method,
            url = %url,
            status,
            request_id = %request.request_id,
            duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "request completed"
        );

        let response = TransportResponse::new(status, body);
        if response.is_success() {
            Ok(response)
        } else {
            Err(TransportError::from_response(&response))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_default_config() {
        let transport = HttpTransport::new(TransportConfig::default()).unwrap();
        assert_eq!(transport.config().base_url, "http://localhost:5000/api");
    }

    #[test]
    fn test_new_rejects_bad_header() {
        let config = TransportConfig::default().with_header("bad header", "x");
        let err = HttpTransport::new(config).unwrap_err();
        assert!(matches!(err, TransportError::Configuration { .. }));
    }

    #[test]
    fn test_new_rejects_zero_timeout() {
        let err = HttpTransport::new(TransportConfig::default().with_timeout(0.0)).unwrap_err();
        assert!(matches!(err, TransportError::Configuration { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let config = TransportConfig::default()
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(2.0);
        let transport = HttpTransport::new(config).unwrap();
        let request = TransportRequest::new(Method::Post, "/items", serde_json::json!({}));

        let err = transport.request(request).await.unwrap_err();
        assert!(matches!(err, TransportError::Network { .. }));
    }
}
