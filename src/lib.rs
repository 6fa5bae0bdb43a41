//! # gsa-search
//!
//! Client for the Google Search Appliance (GSA) XML search protocol.
//!
//! Each search is a single `GET {base_url}?q=..&num=..&start=..`; the XML
//! response is parsed into typed records ([`SearchResult`], [`ResultItem`]).
//!
//! ## Design
//!
//! - One request per call: no retries, no caching, no background work
//! - Optional XML elements become `None` fields rather than empty strings
//! - [`GsaClient::total_results`] works around the appliance's unreliable
//!   result estimate by probing the last reachable page
//!
//! ## Logging
//!
//! Queries are logged only at trace level via [`tracing`]. The crate installs
//! no subscriber.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod types;

pub use client::{corrected_total, GsaClient};
pub use config::GsaConfig;
pub use error::{Result, SearchError};
pub use request::{build_search_url, SearchQuery};
pub use response::parse_search_response;
pub use types::{CacheDescriptor, Detail, Features, ResultItem, SearchResult};

/// Run a single search against `base_url` with default settings.
///
/// Convenience wrapper that builds a one-off [`GsaClient`].
///
/// # Errors
///
/// Same as [`GsaClient::search`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> gsa_search::Result<()> {
/// let query = gsa_search::SearchQuery::new("juju charms").with_domain("site:ubuntu.com");
/// let page = gsa_search::search("http://gsa.example.com/search", &query).await?;
/// println!("{} items", page.items.len());
/// # Ok(())
/// # }
/// ```
pub async fn search(base_url: &str, query: &SearchQuery) -> Result<SearchResult> {
    GsaClient::new(base_url)?.search(query).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_validates_query_count() {
        let query = SearchQuery::new("test").with_count(0);
        let result = search("http://127.0.0.1:9/search", &query).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("count"));
    }
}
