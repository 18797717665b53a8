//! Generic fallback extractor for unlisted domains.
//!
//! No site knowledge, only conventions: `<title>` for the name, a
//! prioritized cascade for the price (see [`price`]), Open-Graph and
//! class-hinted `<img>` tags for the image, and the generic stock
//! vocabulary. Built for graceful degradation — any subset of fields may
//! come back empty.

pub(crate) mod jsonld;
pub mod price;

use hoshii_core::{AppConfig, ScrapeResult, Source, NAME_PLACEHOLDER};
use url::Url;

use crate::text::{capture_first, collapse_whitespace, decode_entities, meta_content, strip_site_suffix};
use crate::{fetch, stock, urlcheck};

const FETCH_FAILED_NOTE: &str = "商品ページを取得できませんでした。";
const BLOCKED_NOTE: &str = "このURLは取得対象にできません。";

/// Fetch an arbitrary product page and extract a normalized result.
///
/// Re-rejects private/internal hosts at this layer — redundant with the
/// orchestrator's check, and intentionally so.
pub async fn extract(
    client: &reqwest::Client,
    config: &AppConfig,
    sanitized_url: &str,
    hostname: &str,
) -> ScrapeResult {
    let recheck = urlcheck::sanitize_generic(sanitized_url);
    if !recheck.is_valid {
        return ScrapeResult::diagnostic(Source::Other, BLOCKED_NOTE);
    }

    match fetch::fetch_html(client, &recheck.sanitized_url, &config.user_agent).await {
        Ok(html) => extract_from_html(&recheck.sanitized_url, hostname, &html),
        Err(err) => {
            tracing::warn!(url = sanitized_url, error = %err, "generic product fetch failed");
            let mut result = ScrapeResult::diagnostic(Source::Other, FETCH_FAILED_NOTE);
            result.source_name = Some(site_label(hostname));
            result
        }
    }
}

/// Pure extraction over an already-fetched document.
///
/// `page_url` is only used to resolve relative image URLs; it is never
/// fetched from here.
#[must_use]
pub fn extract_from_html(page_url: &str, hostname: &str, html: &str) -> ScrapeResult {
    let price = match price::extract_price(html) {
        Some((price, step)) => {
            tracing::debug!(hostname, step, price, "generic price step matched");
            Some(price)
        }
        None => None,
    };

    ScrapeResult {
        name: extract_title(html).unwrap_or_else(|| NAME_PLACEHOLDER.to_string()),
        price,
        image_url: extract_image(html).and_then(|src| resolve_image_url(page_url, &src)),
        source: Source::Other,
        source_name: Some(site_label(hostname)),
        stock_status: stock::classify_generic(html),
        note: None,
    }
}

/// Page `<title>`, entity-decoded, whitespace-collapsed, with the trailing
/// site-name suffix stripped.
pub(crate) fn extract_title(html: &str) -> Option<String> {
    let raw = capture_first(html, r"(?is)<title[^>]*>(.*?)</title>")?;
    let cleaned = strip_site_suffix(&collapse_whitespace(&decode_entities(&raw)));
    (!cleaned.is_empty()).then_some(cleaned)
}

/// `og:image` first, then a main-photo class hint, then the looser
/// product/main/item class hints.
fn extract_image(html: &str) -> Option<String> {
    meta_content(html, "og:image")
        .or_else(|| img_src_with_class_hint(html, r"main[-_]?(?:image|photo|visual)"))
        .or_else(|| img_src_with_class_hint(html, r"(?:product|main|item)"))
}

/// `src` of the first `<img>` whose class matches `hint`. Both attribute
/// orders are tried — `class` before `src` and the reverse.
fn img_src_with_class_hint(html: &str, hint: &str) -> Option<String> {
    let patterns = [
        format!(
            r#"(?is)<img[^>]+class\s*=\s*["'][^"']*{hint}[^"']*["'][^>]*src\s*=\s*["']([^"']+)["']"#
        ),
        format!(
            r#"(?is)<img[^>]+src\s*=\s*["']([^"']+)["'][^>]*class\s*=\s*["'][^"']*{hint}[^"']*["']"#
        ),
    ];
    patterns
        .iter()
        .find_map(|pattern| capture_first(html, pattern))
}

/// Resolve a possibly-relative image URL against the fetched page.
///
/// `Url::join` handles absolute inputs, protocol-relative `//cdn...`
/// inputs, and path-relative inputs alike. Inline `data:` images are not
/// URLs worth keeping.
fn resolve_image_url(page_url: &str, src: &str) -> Option<String> {
    if src.starts_with("data:") {
        return None;
    }
    let base = Url::parse(page_url).ok()?;
    base.join(src).ok().map(Into::into)
}

/// Human-readable site label: first hostname label, `www.` stripped,
/// capitalized.
fn site_label(hostname: &str) -> String {
    let stripped = hostname.strip_prefix("www.").unwrap_or(hostname);
    let first = stripped.split('.').next().unwrap_or(stripped);
    let mut chars = first.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoshii_core::StockStatus;

    #[test]
    fn extracts_a_typical_storefront_page() {
        let html = r#"
            <html><head>
            <title>スーパーウィジェット &amp; ケース - Example Shop</title>
            <meta property="og:image" content="/images/widget-main.jpg">
            </head><body>
            <span class="selling-price">¥3,480</span>
            <button>カートに入れる</button>
            </body></html>
        "#;
        let result = extract_from_html("https://shop.example.com/items/42", "shop.example.com", html);
        assert_eq!(result.name, "スーパーウィジェット & ケース");
        assert_eq!(result.price, Some(3480));
        assert_eq!(
            result.image_url.as_deref(),
            Some("https://shop.example.com/images/widget-main.jpg")
        );
        assert_eq!(result.source, Source::Other);
        assert_eq!(result.source_name.as_deref(), Some("Shop"));
        assert_eq!(result.stock_status, StockStatus::InStock);
        assert_eq!(result.note, None);
    }

    #[test]
    fn bare_page_degrades_to_placeholder_and_nones() {
        let result = extract_from_html(
            "https://shop.example.com/",
            "shop.example.com",
            "<html><body><p>under construction</p></body></html>",
        );
        assert_eq!(result.name, NAME_PLACEHOLDER);
        assert_eq!(result.price, None);
        assert_eq!(result.image_url, None);
        assert_eq!(result.stock_status, StockStatus::Unknown);
    }

    #[test]
    fn title_suffix_and_entities_are_cleaned() {
        let html = "<title>Widget&nbsp;Pro | My&amp;Shop</title>";
        assert_eq!(extract_title(html).as_deref(), Some("Widget Pro"));
    }

    #[test]
    fn class_hinted_image_is_found_in_either_attribute_order() {
        let class_first = r#"<img class="product-main-image" src="https://cdn.example.com/a.jpg">"#;
        let result = extract_from_html("https://x.example.com/", "x.example.com", class_first);
        assert_eq!(result.image_url.as_deref(), Some("https://cdn.example.com/a.jpg"));

        let src_first = r#"<img src="https://cdn.example.com/b.jpg" class="item_photo">"#;
        let result = extract_from_html("https://x.example.com/", "x.example.com", src_first);
        assert_eq!(result.image_url.as_deref(), Some("https://cdn.example.com/b.jpg"));
    }

    #[test]
    fn relative_and_protocol_relative_images_resolve_against_the_page() {
        let relative = r#"<img class="main_image" src="../img/widget.png">"#;
        let result = extract_from_html(
            "https://shop.example.com/items/42/detail",
            "shop.example.com",
            relative,
        );
        assert_eq!(
            result.image_url.as_deref(),
            Some("https://shop.example.com/items/img/widget.png")
        );

        let protocol_relative = r#"<meta property="og:image" content="//cdn.example.com/w.jpg">"#;
        let result = extract_from_html(
            "https://shop.example.com/items/42",
            "shop.example.com",
            protocol_relative,
        );
        assert_eq!(result.image_url.as_deref(), Some("https://cdn.example.com/w.jpg"));
    }

    #[test]
    fn data_uri_images_are_dropped() {
        let html = r#"<img class="main_image" src="data:image/gif;base64,R0lGOD">"#;
        let result = extract_from_html("https://x.example.com/", "x.example.com", html);
        assert_eq!(result.image_url, None);
    }

    #[test]
    fn site_label_strips_www_and_capitalizes() {
        assert_eq!(site_label("www.suruga-ya.jp"), "Suruga-ya");
        assert_eq!(site_label("shop.example.com"), "Shop");
        assert_eq!(site_label("mercari.com"), "Mercari");
    }

    #[tokio::test]
    async fn private_hosts_are_rejected_before_any_fetch() {
        let client = reqwest::Client::new();
        let config = AppConfig {
            log_level: "info".to_string(),
            scrape_timeout_secs: 5,
            user_agent: "test-agent/1.0".to_string(),
            mobile_user_agent: "test-mobile/1.0".to_string(),
            inter_request_delay_ms: 0,
        };
        let result = extract(&client, &config, "http://127.0.0.1/admin", "127.0.0.1").await;
        assert_eq!(result.price, None);
        assert!(result.note.is_some());
        assert_eq!(result.source, Source::Other);
    }
}
