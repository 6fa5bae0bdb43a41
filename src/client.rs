//! The appliance client: search and total-count correction.

use crate::config::GsaConfig;
use crate::error::SearchError;
use crate::http;
use crate::request::SearchQuery;
use crate::response::parse_search_response;
use crate::types::SearchResult;

/// Offset of the page used to recover the true total.
///
/// The appliance returns nothing for `start` beyond 1000, but `start = 990`
/// always yields the final page of results, however short.
pub const TOTAL_PROBE_START: u32 = 990;

/// Page size of the total-count probe.
pub const TOTAL_PROBE_COUNT: u32 = 10;

/// A client bound to one search appliance endpoint.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> gsa_search::Result<()> {
/// use gsa_search::{GsaClient, SearchQuery};
///
/// let client = GsaClient::new("http://gsa.example.com/search")?;
/// let page = client.search(&SearchQuery::new("hello world")).await?;
/// for item in &page.items {
///     println!("{}: {:?}", item.index, item.title);
/// }
/// let total = client.total_results::<&str>("hello world", &[]).await?;
/// println!("{total} results");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GsaClient {
    config: GsaConfig,
    http: reqwest::Client,
}

impl GsaClient {
    /// Create a client for `base_url` with default transport settings.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SearchError> {
        Self::with_config(GsaConfig::new(base_url))
    }

    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid, or
    /// [`SearchError::Transport`] if the HTTP client cannot be built.
    pub fn with_config(config: GsaConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let http = http::build_client(&config)?;
        Ok(Self { config, http })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &GsaConfig {
        &self.config
    }

    /// Run one search and parse the returned page.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for a zero `count`, otherwise any
    /// transport or parse error from the single round trip.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult, SearchError> {
        query.validate()?;
        let url = query.to_url(&self.config.base_url);
        tracing::trace!(
            query = %query.text,
            start = query.start,
            count = query.count,
            "appliance search"
        );

        let body = http::fetch(&self.http, &url).await?;
        parse_search_response(&body)
    }

    /// Total number of documents matching `query`.
    ///
    /// The appliance's own estimate (`M`) is unreliable, so this requests the
    /// page at [`TOTAL_PROBE_START`] and reports the global index of its last
    /// item. An empty probe page yields `0`.
    ///
    /// # Errors
    ///
    /// Propagates transport and parse errors from the probe request.
    pub async fn total_results<S: AsRef<str>>(
        &self,
        query: &str,
        domains: &[S],
    ) -> Result<u64, SearchError> {
        let probe = SearchQuery::new(query)
            .with_domains(domains.iter().map(|d| d.as_ref().to_string()))
            .with_start(TOTAL_PROBE_START)
            .with_count(TOTAL_PROBE_COUNT);

        let page = self.search(&probe).await?;
        let total = corrected_total(&page);
        tracing::debug!(
            total,
            estimated = page.estimated_total.as_deref().unwrap_or(""),
            "corrected total"
        );
        Ok(total)
    }
}

/// Corrected total for a probe page: the last item's global index, or `0`.
pub fn corrected_total(page: &SearchResult) -> u64 {
    page.last_index().unwrap_or(0)
}
