//! Client configuration.
//!
//! [`GsaConfig`] binds a client to one appliance endpoint and controls the
//! transport. The appliance URL is taken as given; its shape is the caller's
//! responsibility.

use serde::Deserialize;

use crate::error::SearchError;

/// Configuration for a [`GsaClient`](crate::GsaClient).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GsaConfig {
    /// Search endpoint, e.g. `http://gsa.example.com/search`.
    pub base_url: String,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// User-Agent header to send. If `None`, no User-Agent is set.
    pub user_agent: Option<String>,
}

impl Default for GsaConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_seconds: 10,
            user_agent: None,
        }
    }
}

impl GsaConfig {
    /// Create a config bound to `base_url` with default transport settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Set a User-Agent header.
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Validates this configuration.
    ///
    /// Only the transport settings are checked; `base_url` is never inspected.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
