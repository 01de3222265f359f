//! Configuration for the HTTP transport.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::TransportError;

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "PHARMAFORM_API_URL";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "PHARMAFORM_TIMEOUT_SECONDS";

/// Settings for reaching the pharmacy API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// API root, e.g. `http://localhost:5000/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Additional headers to include.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout() -> f64 {
    30.0
}

fn default_user_agent() -> String {
    concat!("pharmaform/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            headers: HashMap::new(),
        }
    }
}

impl TransportConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `PHARMAFORM_API_URL` and
    /// `PHARMAFORM_TIMEOUT_SECONDS` when set.
    pub fn from_env() -> Result<Self, TransportError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TransportError> {
        let mut config = Self::default();
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let seconds: f64 = raw.trim().parse().map_err(|_| {
                TransportError::configuration(format!("{TIMEOUT_ENV} must be a number, got '{raw}'"))
            })?;
            config.timeout_seconds = seconds;
        }
        config.validate()?;
        Ok(config)
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Gets timeout as Duration.
    ///
    /// Falls back to the default when `timeout_seconds` is not a
    /// representable duration; [`validate`](Self::validate) rejects those.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_seconds)
            .unwrap_or_else(|_| Duration::from_secs_f64(default_timeout()))
    }

    /// Joins the base URL and a request path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Rejects an empty base URL or a timeout that is not a positive duration.
    pub fn validate(&self) -> Result<(), TransportError> {
        if self.base_url.trim().is_empty() {
            return Err(TransportError::configuration("base_url must not be empty"));
        }
        if self.timeout_seconds <= 0.0 {
            return Err(TransportError::configuration(format!(
                "timeout_seconds must be positive, got {}",
                self.timeout_seconds
            )));
        }
        if let Err(err) = Duration::try_from_secs_f64(self.timeout_seconds) {
            return Err(TransportError::configuration(format!(
                "timeout_seconds {} is not a valid duration: {err}",
                self.timeout_seconds
            )));
        }
        Ok(())
    }
}
