use crate::error::ScrapeError;
use log::{debug, warn};
use scraper::{Html, Selector};
use serde_json::Value;

const LINKED_DATA_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

/// Text content of every JSON-LD script element, in document order.
pub fn linked_data_scripts(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(LINKED_DATA_SELECTOR).expect("static selector is valid");

    let scripts: Vec<String> = document
        .select(&selector)
        .map(|script| script.text().collect::<String>())
        .collect();
    debug!("JsonLd: found {} JSON-LD script tags", scripts.len());
    scripts
}

/// Parse every JSON-LD block on the page.
///
/// Blocks are parsed independently; a malformed one is logged and skipped.
pub fn extract_linked_data(html: &str) -> Vec<Value> {
    linked_data_scripts(html)
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match parse_block(raw) {
            Ok(block) => Some(block),
            Err(e) => {
                warn!("JsonLd: skipping block {}: {}", index, e);
                None
            }
        })
        .collect()
}

pub fn parse_block(raw: &str) -> Result<Value, ScrapeError> {
    Ok(serde_json::from_str(sanitize_json(raw))?)
}

/// Strip the wrappers CMSes put around script bodies.
fn sanitize_json(raw: &str) -> &str {
    let mut cleaned = raw.trim();
    for (open, close) in [("<!--", "-->"), ("<![CDATA[", "]]>"), ("//<![CDATA[", "//]]>")] {
        if let Some(inner) = cleaned
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            cleaned = inner.trim();
        }
    }
    cleaned
}
