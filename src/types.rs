//! Typed records for appliance search results.

use serde::{Deserialize, Serialize};

/// One page of results as returned by the appliance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Raw `M` value. The appliance's estimate is known to be unreliable; see
    /// [`GsaClient::total_results`](crate::GsaClient::total_results).
    pub estimated_total: Option<String>,
    /// Whether the appliance applied duplicate-document filtering (`FI`).
    pub document_filtering: bool,
    /// Link to the next page (`NB/NU`).
    pub next_url: Option<String>,
    /// Link to the previous page (`NB/PU`).
    pub previous_url: Option<String>,
    /// Result items in document order.
    pub items: Vec<ResultItem>,
}

impl SearchResult {
    /// Returns `true` if the appliance offered a next-page link.
    pub fn has_next_page(&self) -> bool {
        self.next_url.is_some()
    }

    /// Returns `true` if the appliance offered a previous-page link.
    pub fn has_previous_page(&self) -> bool {
        self.previous_url.is_some()
    }

    /// Global index of the last item on this page, if any.
    pub fn last_index(&self) -> Option<u64> {
        self.items.last().map(|item| item.index)
    }
}

/// A single search hit (`R` element).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    /// 1-based rank across the whole result set, not within the page.
    pub index: u64,
    pub url: Option<String>,
    pub encoded_url: Option<String>,
    pub title: Option<String>,
    pub relevancy: Option<String>,
    /// Source appliance (`ENT_SOURCE`).
    pub appliance_id: Option<String>,
    pub summary: Option<String>,
    pub language: Option<String>,
    /// Named metadata attributes (`FS`), order preserving, duplicates allowed.
    pub details: Vec<Detail>,
    pub features: Features,
}

/// A `NAME`/`VALUE` metadata pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    pub name: String,
    pub value: String,
}

/// Capabilities advertised under an item's `HAS` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    /// `HAS/L`: the appliance supports link queries for this URL.
    pub link_supported: bool,
    /// `HAS/C`: a cached copy exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheDescriptor>,
}

/// Cached-copy descriptor. Attributes absent in the response stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheDescriptor {
    /// `SZ`, verbatim (the appliance reports values such as `"7k"`).
    pub size: Option<String>,
    /// `CID`.
    pub cache_id: Option<String>,
    /// `ENC`.
    pub encoding: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(index: u64) -> ResultItem {
        ResultItem {
            index,
            ..Default::default()
        }
    }

    #[test]
    fn last_index_of_empty_page_is_none() {
        assert_eq!(SearchResult::default().last_index(), None);
    }

    #[test]
    fn last_index_uses_document_order_not_maximum() {
        let result = SearchResult {
            items: vec![item(40), item(12)],
            ..Default::default()
        };
        assert_eq!(result.last_index(), Some(12));
    }

    #[test]
    fn page_link_accessors() {
        let result = SearchResult {
            next_url: Some("/search?q=x&start=10".into()),
            ..Default::default()
        };
        assert!(result.has_next_page());
        assert!(!result.has_previous_page());
    }

    #[test]
    fn features_without_cache_omit_cache_key() {
        let features = Features {
            link_supported: true,
            cache: None,
        };
        let json = serde_json::to_value(&features).expect("serialize");
        assert_eq!(json, serde_json::json!({"link_supported": true}));
    }

    #[test]
    fn search_result_serde_round_trip() {
        let result = SearchResult {
            estimated_total: Some("120".into()),
            document_filtering: true,
            items: vec![ResultItem {
                index: 3,
                title: Some("Ubuntu".into()),
                details: vec![Detail {
                    name: "author".into(),
                    value: "Canonical".into(),
                }],
                features: Features {
                    link_supported: false,
                    cache: Some(CacheDescriptor {
                        size: Some("7k".into()),
                        cache_id: None,
                        encoding: Some("UTF-8".into()),
                    }),
                },
                ..Default::default()
            }],
            ..Default::default()
        };
        let json = serde_json::to_string(&result).expect("serialize");
        let decoded: SearchResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, result);
    }
}
