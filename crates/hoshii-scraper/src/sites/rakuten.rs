//! Rakuten Ichiba product-page extractor.

use hoshii_core::{AppConfig, ScrapeResult, Source, NAME_PLACEHOLDER};

use crate::text::{
    capture_first, collapse_whitespace, decode_entities, meta_content, parse_yen_digits,
};
use crate::{fetch, stock, urlcheck};

/// Rakuten's overload / access-block interstitials. Thinner than Amazon's
/// fingerprint set — fewer observed markers. Absence of the name anchor is
/// deliberately NOT treated as interdiction here, to avoid false advisory
/// notes on ordinary layout drift.
const BOT_WALL_MARKERS: &[&str] = &["アクセスが集中しています", "現在、大変混み合っております"];

const BOT_WALL_NOTE: &str =
    "楽天市場にアクセスが集中しています。しばらくしてから再取得してください。";
const FETCH_FAILED_NOTE: &str = "楽天市場の商品ページを取得できませんでした。";
const WRONG_HOST_NOTE: &str = "楽天市場の商品URLではありません。";

/// Fetch a Rakuten product page and extract a normalized result.
///
/// Same contract as the Amazon extractor: never an error, hostname
/// re-verified locally.
pub async fn extract(
    client: &reqwest::Client,
    config: &AppConfig,
    sanitized_url: &str,
) -> ScrapeResult {
    let classification = urlcheck::classify(sanitized_url);
    if !classification.is_valid || classification.source != Source::Rakuten {
        return ScrapeResult::diagnostic(Source::Rakuten, WRONG_HOST_NOTE);
    }

    match fetch::fetch_html(client, &classification.sanitized_url, &config.user_agent).await {
        Ok(html) => extract_from_html(&html),
        Err(err) => {
            tracing::warn!(url = sanitized_url, error = %err, "rakuten product fetch failed");
            ScrapeResult::diagnostic(Source::Rakuten, FETCH_FAILED_NOTE)
        }
    }
}

/// Pure extraction over an already-fetched Rakuten document.
#[must_use]
pub fn extract_from_html(html: &str) -> ScrapeResult {
    if is_bot_walled(html) {
        tracing::warn!("rakuten access-block fingerprint matched");
        return ScrapeResult::diagnostic(Source::Rakuten, BOT_WALL_NOTE);
    }

    ScrapeResult {
        name: extract_name(html).unwrap_or_else(|| NAME_PLACEHOLDER.to_string()),
        price: extract_price(html),
        image_url: extract_image(html),
        source: Source::Rakuten,
        source_name: Source::Rakuten.label().map(str::to_string),
        stock_status: stock::classify_rakuten(html),
        note: None,
    }
}

fn is_bot_walled(html: &str) -> bool {
    BOT_WALL_MARKERS.iter().any(|marker| html.contains(marker))
}

/// Primary name anchor: the `itemprop="name"` element.
fn extract_name(html: &str) -> Option<String> {
    let raw = capture_first(html, r#"(?s)itemprop="name"[^>]*>(.*?)<"#)?;
    let name = collapse_whitespace(&decode_entities(&raw));
    (!name.is_empty()).then_some(name)
}

/// Primary price anchor: the `itemprop="price"` content attribute.
///
/// The capture stops at a decimal point on purpose: `content="1980.00"`
/// must parse as 1980, not 198000.
fn extract_price(html: &str) -> Option<u64> {
    capture_first(html, r#"itemprop="price"[^>]*content="([0-9][0-9,]*)"#)
        .as_deref()
        .and_then(parse_yen_digits)
}

/// `og:image` first, then the `itemprop="image"` anchor.
fn extract_image(html: &str) -> Option<String> {
    meta_content(html, "og:image")
        .or_else(|| capture_first(html, r#"itemprop="image"[^>]*content="([^"]+)""#))
        .or_else(|| capture_first(html, r#"itemprop="image"[^>]*src="([^"]+)""#))
}
