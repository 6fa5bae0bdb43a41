//! Parser for appliance XML result documents.
//!
//! The layout follows the GSA XML results format: everything of interest
//! lives under `/GSP/RES`, with one `R` element per hit. Lookups are
//! structural; a missing optional element is an absent field, never an error.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};
use roxmltree::{Document, Node, ParsingOptions};

use crate::error::SearchError;
use crate::types::{CacheDescriptor, Detail, Features, ResultItem, SearchResult};

/// Parse an appliance response body into a [`SearchResult`].
///
/// A document without `/GSP/RES` yields an empty result.
///
/// # Errors
///
/// Returns [`SearchError::MalformedResponse`] if `raw` is not well-formed
/// XML in its declared encoding, and [`SearchError::MalformedItem`] if any `R` element lacks a
/// numeric `N` attribute. A single bad item fails the whole parse.
pub fn parse_search_response(raw: &[u8]) -> Result<SearchResult, SearchError> {
    let text = decode_document(raw)?;

    let mut options = ParsingOptions::default();
    options.allow_dtd = true;

    let document = Document::parse_with_options(&text, options)
        .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

    let root = document.root_element();
    let res = match root.has_tag_name("GSP").then(|| child(root, "RES")).flatten() {
        Some(res) => res,
        None => {
            tracing::debug!("response has no /GSP/RES element");
            return Ok(SearchResult::default());
        }
    };

    let navigation = child(res, "NB");
    let items = res
        .children()
        .filter(|n| n.is_element() && n.has_tag_name("R"))
        .map(parse_item)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(count = items.len(), "appliance results parsed");

    Ok(SearchResult {
        estimated_total: child_text(res, "M"),
        document_filtering: child(res, "FI").is_some(),
        next_url: navigation.and_then(|nb| child_text(nb, "NU")),
        previous_url: navigation.and_then(|nb| child_text(nb, "PU")),
        items,
    })
}

/// Decode `raw` to text using its byte-order mark, else the `encoding` of
/// its XML declaration, else UTF-8.
fn decode_document(raw: &[u8]) -> Result<Cow<'_, str>, SearchError> {
    let (encoding, body) = match Encoding::for_bom(raw) {
        Some((encoding, bom_len)) => (encoding, &raw[bom_len..]),
        None => (declared_encoding(raw)?, raw),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| {
            SearchError::MalformedResponse(format!("response is not valid {}", encoding.name()))
        })
}

/// Encoding named by the XML declaration, if the document has one.
fn declared_encoding(raw: &[u8]) -> Result<&'static Encoding, SearchError> {
    let Some(rest) = raw.strip_prefix(b"<?xml") else {
        return Ok(UTF_8);
    };
    let Some(end) = rest.windows(2).position(|w| w == b"?>") else {
        return Ok(UTF_8);
    };
    let declaration = String::from_utf8_lossy(&rest[..end]);

    let Some(pos) = declaration.find("encoding") else {
        return Ok(UTF_8);
    };
    let value = declaration[pos + "encoding".len()..]
        .trim_start()
        .strip_prefix('=')
        .map(str::trim_start)
        .unwrap_or_default();
    let label = match value.chars().next() {
        Some(quote @ ('"' | '\'')) => value[1..].split(quote).next().unwrap_or_default(),
        _ => "",
    };

    Encoding::for_label(label.as_bytes()).ok_or_else(|| {
        SearchError::MalformedResponse(format!("unsupported encoding {label:?}"))
    })
}

fn parse_item(node: Node<'_, '_>) -> Result<ResultItem, SearchError> {
    let index = match node.attribute("N") {
        Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
            SearchError::MalformedItem(format!("R element has non-numeric N attribute {raw:?}"))
        })?,
        None => {
            return Err(SearchError::MalformedItem(
                "R element is missing its N attribute".into(),
            ));
        }
    };

    Ok(ResultItem {
        index,
        url: child_text(node, "U"),
        encoded_url: child_text(node, "UE"),
        title: child_text(node, "T"),
        relevancy: child_text(node, "RK"),
        appliance_id: child_text(node, "ENT_SOURCE"),
        summary: child_text(node, "S"),
        language: child_text(node, "LANG"),
        details: parse_details(node, index),
        features: parse_features(node),
    })
}

fn parse_details(node: Node<'_, '_>, index: u64) -> Vec<Detail> {
    node.children()
        .filter(|n| n.is_element() && n.has_tag_name("FS"))
        .filter_map(|fs| match (fs.attribute("NAME"), fs.attribute("VALUE")) {
            (Some(name), Some(value)) => Some(Detail {
                name: name.to_string(),
                value: value.to_string(),
            }),
            _ => {
                tracing::debug!(index, "skipping FS element without NAME/VALUE");
                None
            }
        })
        .collect()
}

fn parse_features(node: Node<'_, '_>) -> Features {
    let mut features = Features::default();

    let capabilities = node
        .children()
        .filter(|n| n.is_element() && n.has_tag_name("HAS"))
        .flat_map(|has| has.children().filter(|n| n.is_element()));

    for capability in capabilities {
        match capability.tag_name().name() {
            "L" => features.link_supported = true,
            "C" => {
                features.cache = Some(CacheDescriptor {
                    size: capability.attribute("SZ").map(str::to_string),
                    cache_id: capability.attribute("CID").map(str::to_string),
                    encoding: capability.attribute("ENC").map(str::to_string),
                });
            }
            _ => {}
        }
    }

    features
}

/// First child element named `tag`.
fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.is_element() && n.has_tag_name(tag))
}

/// Text of the first child element named `tag`; `Some("")` if it has none.
fn child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child(node, tag).map(|n| n.text().unwrap_or_default().to_string())
}
