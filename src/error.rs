//! Error types for the gsa-search crate.
//!
//! Every failure surfaces synchronously to the immediate caller. Nothing is
//! retried or recovered internally.

/// Errors that can occur while querying a search appliance.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The HTTP request failed, the body could not be read, or the appliance
    /// answered with a non-2xx status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body is not well-formed XML.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A result element lacks a valid numeric `N` attribute.
    #[error("malformed item: {0}")]
    MalformedItem(String),

    /// Invalid client configuration or query.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for gsa-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
