use super::PROVIDER_DOMAIN;
use crate::http::*;
use scraper::{Html, Selector};
use tracing::{debug, warn};

/// Resolve the composition download link from a product's page URL.
///
/// Returns `Ok(None)` when the page carries no csv link at all; request
/// failures are returned as errors so the batch loop can record them per
/// product.
pub async fn resolve(http_client: &HttpClient, page_url: &str) -> anyhow::Result<Option<String>> {
    debug!("scanning product page {page_url} for a csv link");
    let html = http_client.get(page_url).send().await?.text().await?;

    Ok(extract_csv_href(&html).map(|href| absolutize(&href)))
}

/// First `href` containing the substring `csv`, in document order.
///
/// Anchors without an `href` attribute are skipped with a warning; one odd
/// element never aborts the scan.
pub fn extract_csv_href(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a").expect("static anchor selector");

    for anchor in document.select(&anchors) {
        let href = match anchor.value().attr("href") {
            Some(href) => href,
            None => {
                warn!("anchor element without href attribute, skipping");
                continue;
            }
        };
        if href.contains("csv") {
            return Some(href.to_string());
        }
    }

    None
}

/// Prefix a relative href with the provider domain; absolute links pass
/// through untouched.
pub fn absolutize(href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{PROVIDER_DOMAIN}{href}")
    }
}
