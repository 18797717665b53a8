//! Amazon.co.jp product-page extractor.

use hoshii_core::{AppConfig, ScrapeResult, Source, NAME_PLACEHOLDER};

use crate::text::{capture_first, collapse_whitespace, decode_entities, parse_yen_digits};
use crate::{fetch, stock, urlcheck};

/// Fingerprints of Amazon's automated-access interdiction pages, matched
/// against the lowercased body. These pages come back with HTTP 200, so
/// status codes are useless here.
const BOT_WALL_MARKERS: &[&str] = &[
    "api-services-support@amazon.com",
    "/errors/validatecaptcha",
    "robot check",
    "ご迷惑をおかけしています",
    "続行するには、以下の文字を入力してください",
];

const BOT_WALL_NOTE: &str =
    "Amazonにアクセスをブロックされた可能性があります。価格は手動で入力してください。";
const FETCH_FAILED_NOTE: &str = "Amazonの商品ページを取得できませんでした。";
const WRONG_HOST_NOTE: &str = "Amazonの商品URLではありません。";

/// Fetch an Amazon product page and extract a normalized result.
///
/// Never returns an error: bot walls, network failures and missing fields
/// all degrade into the result itself.
pub async fn extract(
    client: &reqwest::Client,
    config: &AppConfig,
    sanitized_url: &str,
) -> ScrapeResult {
    // Re-verify even though the router already classified: this function
    // must not be usable to fetch an arbitrary host.
    let classification = urlcheck::classify(sanitized_url);
    if !classification.is_valid || classification.source != Source::Amazon {
        return ScrapeResult::diagnostic(Source::Amazon, WRONG_HOST_NOTE);
    }

    match fetch::fetch_html(client, &classification.sanitized_url, &config.user_agent).await {
        Ok(html) => extract_from_html(&html),
        Err(err) => {
            tracing::warn!(url = sanitized_url, error = %err, "amazon product fetch failed");
            ScrapeResult::diagnostic(Source::Amazon, FETCH_FAILED_NOTE)
        }
    }
}

/// Pure extraction over an already-fetched Amazon document.
#[must_use]
pub fn extract_from_html(html: &str) -> ScrapeResult {
    if is_bot_walled(html) {
        tracing::warn!("amazon bot interdiction fingerprint matched");
        return ScrapeResult::diagnostic(Source::Amazon, BOT_WALL_NOTE);
    }

    ScrapeResult {
        name: extract_name(html).unwrap_or_else(|| NAME_PLACEHOLDER.to_string()),
        price: extract_price(html),
        image_url: extract_image(html),
        source: Source::Amazon,
        source_name: Source::Amazon.label().map(str::to_string),
        stock_status: stock::classify_amazon(html),
        note: None,
    }
}

fn is_bot_walled(html: &str) -> bool {
    let lower = html.to_lowercase();
    BOT_WALL_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Primary name anchor: the `productTitle` span.
fn extract_name(html: &str) -> Option<String> {
    let raw = capture_first(html, r#"(?s)id="productTitle"[^>]*>(.*?)<"#)?;
    let name = collapse_whitespace(&decode_entities(&raw));
    (!name.is_empty()).then_some(name)
}

/// Primary price anchor: the whole-yen part of the buybox price.
fn extract_price(html: &str) -> Option<u64> {
    capture_first(html, r#"a-price-whole"[^>]*>\s*([0-9][0-9,]*)"#)
        .as_deref()
        .and_then(parse_yen_digits)
}

/// Prefer the high-resolution image hint, then the landing image anchor.
fn extract_image(html: &str) -> Option<String> {
    let patterns = [
        r#""hiRes":"(https://[^"]+)""#,
        r#"id="landingImage"[^>]*src="([^"]+)""#,
        r#"src="([^"]+)"[^>]*id="landingImage""#,
        r#"data-old-hires="(https://[^"]+)""#,
    ];
    patterns
        .iter()
        .find_map(|pattern| capture_first(html, pattern))
}
