//! HTTP transport for appliance requests.
//!
//! Provides a configured [`reqwest::Client`] and the single GET used by every
//! search. Failures are mapped to [`SearchError::Transport`] and never retried.

use crate::config::GsaConfig;
use crate::error::SearchError;
use std::time::Duration;

/// Build a [`reqwest::Client`] for appliance requests.
///
/// The client has:
/// - Timeout from config
/// - User-Agent only if one is configured
/// - Gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Transport`] if the client cannot be constructed.
pub fn build_client(config: &GsaConfig) -> Result<reqwest::Client, SearchError> {
    let mut builder = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .redirect(reqwest::redirect::Policy::limited(10));

    if let Some(ref ua) = config.user_agent {
        builder = builder.user_agent(ua.clone());
    }

    builder
        .build()
        .map_err(|e| SearchError::Transport(format!("failed to build HTTP client: {e}")))
}

/// Issue a GET for `url` and return the raw response body.
///
/// # Errors
///
/// Returns [`SearchError::Transport`] if the request fails, the status is not
/// 2xx, or the body cannot be read.
pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, SearchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SearchError::Transport(format!("request failed: {e}")))?
        .error_for_status()
        .map_err(|e| SearchError::Transport(format!("HTTP error: {e}")))?;

    let body = response
        .bytes()
        .await
        .map_err(|e| SearchError::Transport(format!("response read failed: {e}")))?;

    tracing::trace!(bytes = body.len(), "appliance response received");
    Ok(body.to_vec())
}
