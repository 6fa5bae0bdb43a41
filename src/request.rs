//! Search request construction.
//!
//! Turns a [`SearchQuery`] into the appliance URL
//! `{base_url}?q=<query>&num=<count>&start=<start>`.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::SearchError;

/// Default number of results per page.
pub const DEFAULT_COUNT: u32 = 10;

/// A single search request: free text, optional domain restrictions, and a
/// page window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query.
    pub text: String,
    /// Domains to restrict results to. Empty means unrestricted.
    pub domains: Vec<String>,
    /// Zero-based offset of the first result.
    pub start: u32,
    /// Number of results requested. Must be positive.
    pub count: u32,
}

impl SearchQuery {
    /// Create a query for the first page of results.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            domains: Vec::new(),
            start: 0,
            count: DEFAULT_COUNT,
        }
    }

    /// Set the result offset.
    pub fn with_start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    /// Set the number of results requested.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Replace the domain restrictions.
    pub fn with_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains = domains.into_iter().map(Into::into).collect();
        self
    }

    /// Add one domain restriction.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domains.push(domain.into());
        self
    }

    /// Rejects a zero `count`.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.count == 0 {
            return Err(SearchError::Config("count must be greater than 0".into()));
        }
        Ok(())
    }

    /// Build the request URL for this query against `base_url`.
    pub fn to_url(&self, base_url: &str) -> String {
        build_search_url(base_url, &self.text, self.start, self.count, &self.domains)
    }
}

/// Build the appliance search URL.
///
/// A non-empty `domains` list is appended to `query` as ` (d1 | d2 | ...)`.
/// `q`, `num` and `start` are form-encoded in that order and joined to
/// `base_url` with `?`. `base_url` is used verbatim.
pub fn build_search_url<S: AsRef<str>>(
    base_url: &str,
    query: &str,
    start: u32,
    count: u32,
    domains: &[S],
) -> String {
    let q = restrict_to_domains(query, domains);
    let num = count.to_string();
    let start = start.to_string();

    let params = form_urlencoded::Serializer::new(String::new())
        .append_pair("q", &q)
        .append_pair("num", &num)
        .append_pair("start", &start)
        .finish();

    format!("{base_url}?{params}")
}

fn restrict_to_domains<S: AsRef<str>>(query: &str, domains: &[S]) -> String {
    if domains.is_empty() {
        return query.to_string();
    }
    let clause = domains
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" | ");
    format!("{query} ({clause})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    const BASE: &str = "http://gsa.example.com/search";

    fn q_param(url: &str) -> String {
        let parsed = Url::parse(url).expect("valid url");
        parsed
            .query_pairs()
            .find(|(k, _)| k == "q")
            .map(|(_, v)| v.into_owned())
            .expect("q present")
    }

    #[test]
    fn no_domains_keeps_query_verbatim() {
        let url = build_search_url::<&str>(BASE, "hello world", 0, 10, &[]);
        assert_eq!(url, "http://gsa.example.com/search?q=hello+world&num=10&start=0");
        assert_eq!(q_param(&url), "hello world");
    }

    #[test]
    fn single_domain_wrapped_in_parentheses() {
        let url = build_search_url(BASE, "juju", 0, 10, &["site:ubuntu.com"]);
        assert_eq!(q_param(&url), "juju (site:ubuntu.com)");
    }

    #[test]
    fn domains_joined_with_pipe_in_given_order() {
        let domains = vec!["site:b.com".to_string(), "site:a.com".to_string()];
        let url = build_search_url(BASE, "maas", 20, 5, &domains);
        assert_eq!(q_param(&url), "maas (site:b.com | site:a.com)");
        assert!(url.ends_with("&num=5&start=20"));
    }

    #[test]
    fn special_characters_are_encoded() {
        let url = build_search_url::<&str>(BASE, "a&b=c", 0, 10, &[]);
        assert!(url.contains("q=a%26b%3Dc"));
        assert_eq!(q_param(&url), "a&b=c");
    }

    #[test]
    fn base_url_used_verbatim() {
        let url = build_search_url::<&str>("gsa", "x", 0, 1, &[]);
        assert_eq!(url, "gsa?q=x&num=1&start=0");
    }

    #[test]
    fn query_defaults_match_first_page() {
        let query = SearchQuery::new("ubuntu");
        assert_eq!(query.start, 0);
        assert_eq!(query.count, DEFAULT_COUNT);
        assert!(query.domains.is_empty());
        assert!(query.validate().is_ok());
    }

    #[test]
    fn query_builder_to_url() {
        let query = SearchQuery::new("cloud")
            .with_start(10)
            .with_count(20)
            .with_domain("site:ubuntu.com")
            .with_domain("site:canonical.com");
        assert_eq!(
            query.to_url(BASE),
            "http://gsa.example.com/search?q=cloud+%28site%3Aubuntu.com+%7C+site%3Acanonical.com%29&num=20&start=10"
        );
    }

    #[test]
    fn with_domains_replaces_existing() {
        let query = SearchQuery::new("x")
            .with_domain("old")
            .with_domains(["a", "b"]);
        assert_eq!(query.domains, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn zero_count_rejected() {
        let err = SearchQuery::new("x").with_count(0).validate().unwrap_err();
        assert!(err.to_string().contains("count"));
    }
}
