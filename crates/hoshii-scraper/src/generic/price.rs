//! Ordered price-extraction cascade for arbitrary product pages.
//!
//! Each step is a pure `fn(&str) -> Option<u64>` so it can be tested in
//! isolation; the cascade is a short-circuiting fold over [`PRICE_STEPS`].
//! Order encodes trust: structured data first, free-text yen matching
//! last. The free-text tail steps knowingly accept some false positives
//! (shipping fees, unit counts) for coverage — that risk is bounded by the
//! `> 0` rule and the sale-price threshold, and is validated via fixtures
//! rather than strengthened further.

use crate::text::{capture_first, parse_yen_digits};

/// Minimum plausible amount for the labeled sale-price step. Guards
/// against matching unit counts ("2個セット") or point values that happen
/// to sit next to the label.
const SALE_PRICE_MIN_JPY: u64 = 100;

/// One step of the cascade.
pub struct PriceStep {
    /// Stable identifier, used in debug logs when the step wins.
    pub name: &'static str,
    pub run: fn(&str) -> Option<u64>,
}

/// The cascade, highest-trust first. Shared, versioned data: the browser
/// extension mirrors this table against the live DOM.
pub const PRICE_STEPS: &[PriceStep] = &[
    PriceStep {
        name: "jsonld_offer",
        run: super::jsonld::extract_jsonld_price,
    },
    PriceStep {
        name: "inline_json_jpy",
        run: inline_json_jpy,
    },
    PriceStep {
        name: "shopify_minor_units",
        run: shopify_minor_units,
    },
    PriceStep {
        name: "og_price_meta",
        run: og_price_meta,
    },
    PriceStep {
        name: "cart_price_id",
        run: cart_price_id,
    },
    PriceStep {
        name: "sale_price_label",
        run: sale_price_label,
    },
    PriceStep {
        name: "price_class_yen",
        run: price_class_yen,
    },
    PriceStep {
        name: "data_price_attr",
        run: data_price_attr,
    },
    PriceStep {
        name: "yen_suffix",
        run: yen_suffix,
    },
    PriceStep {
        name: "yen_prefix",
        run: yen_prefix,
    },
];

/// Run the cascade; returns the price and the name of the winning step.
#[must_use]
pub fn extract_price(html: &str) -> Option<(u64, &'static str)> {
    PRICE_STEPS
        .iter()
        .find_map(|step| (step.run)(html).map(|price| (price, step.name)))
}

/// Step 2: inline JSON `price` + explicit JPY tag, either field order.
fn inline_json_jpy(html: &str) -> Option<u64> {
    let patterns = [
        r#""price"\s*:\s*"?([0-9][0-9,]*)(?:\.[0-9]+)?"?\s*,\s*"(?:priceCurrency|currency)"\s*:\s*"JPY""#,
        r#""(?:priceCurrency|currency)"\s*:\s*"JPY"\s*,\s*"price"\s*:\s*"?([0-9][0-9,]*)"#,
    ];
    patterns
        .iter()
        .find_map(|pattern| capture_first(html, pattern))
        .as_deref()
        .and_then(parse_yen_digits)
}

/// Step 3: Shopify stores embed prices as minor units (yen × 100) in their
/// product JSON. Gated on a platform fingerprint so the ÷100 convention is
/// never applied to a non-Shopify page.
fn shopify_minor_units(html: &str) -> Option<u64> {
    if !(html.contains("cdn.shopify.com") || html.contains("Shopify.theme")) {
        return None;
    }
    let minor = capture_first(html, r#""price"\s*:\s*([0-9]+)\s*[,}]"#)
        .as_deref()
        .and_then(parse_yen_digits)?;
    (minor >= 100).then_some(minor / 100)
}

/// Step 4: Open-Graph price meta tags, gated on an accompanying JPY
/// currency meta.
fn og_price_meta(html: &str) -> Option<u64> {
    let currency = crate::text::meta_content(html, "og:price:currency")
        .or_else(|| crate::text::meta_content(html, "product:price:currency"))?;
    if !currency.eq_ignore_ascii_case("JPY") {
        return None;
    }
    crate::text::meta_content(html, "og:price:amount")
        .or_else(|| crate::text::meta_content(html, "product:price:amount"))
        .as_deref()
        .and_then(parse_yen_digits)
}

/// Step 5: cart-system price element ids (`product_price` family).
fn cart_price_id(html: &str) -> Option<u64> {
    capture_first(
        html,
        r#"(?is)id\s*=\s*["']product[_-]?price["'][^>]*>\s*[¥￥]?\s*([0-9][0-9,]*)"#,
    )
    .as_deref()
    .and_then(parse_yen_digits)
}

/// Step 6: labeled sale-price text, thresholded.
fn sale_price_label(html: &str) -> Option<u64> {
    capture_first(
        html,
        r"(?:販売価格|特価|セール価格)[^0-9¥￥]{0,20}[¥￥]?\s*([0-9][0-9,]*)",
    )
    .as_deref()
    .and_then(parse_yen_digits)
    .filter(|price| *price >= SALE_PRICE_MIN_JPY)
}

/// Step 7: a `class`/`id` containing "price" followed by a yen-prefixed
/// number.
fn price_class_yen(html: &str) -> Option<u64> {
    capture_first(
        html,
        r#"(?is)(?:class|id)\s*=\s*["'][^"']*price[^"']*["'][^>]*>\s*[¥￥]\s*([0-9][0-9,]*)"#,
    )
    .as_deref()
    .and_then(parse_yen_digits)
    .filter(|price| *price > 0)
}

/// Step 8: `data-price` attribute.
fn data_price_attr(html: &str) -> Option<u64> {
    capture_first(html, r#"data-price\s*=\s*["']([0-9][0-9,]*)["']"#)
        .as_deref()
        .and_then(parse_yen_digits)
        .filter(|price| *price > 0)
}

/// Step 9: any `<number>円` occurrence.
fn yen_suffix(html: &str) -> Option<u64> {
    capture_first(html, r"([0-9][0-9,]*)円")
        .as_deref()
        .and_then(parse_yen_digits)
        .filter(|price| *price > 0)
}

/// Step 10: any `¥<number>` / `JPY <number>` occurrence.
fn yen_prefix(html: &str) -> Option<u64> {
    capture_first(html, r"[¥￥]\s*([0-9][0-9,]*)")
        .or_else(|| capture_first(html, r"JPY\s+([0-9][0-9,]*)"))
        .as_deref()
        .and_then(parse_yen_digits)
        .filter(|price| *price > 0)
}
