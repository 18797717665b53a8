//! JSON-LD offer extraction — the highest-priority price step.
//!
//! Walks `<script type="application/ld+json">` blocks looking for a
//! schema.org offer carrying `price` + `priceCurrency`. Variant offers
//! (`hasVariant[].offers`) are checked before the item's own `offers`,
//! and `@graph` containers are expanded, since many storefronts wrap
//! everything in one top-level graph.

use regex::Regex;
use serde_json::Value;

use crate::text::parse_yen_digits;

/// Extract a whole-yen price from the page's JSON-LD blocks.
///
/// Only offers whose `priceCurrency` is JPY — or absent entirely — are
/// accepted; an explicit foreign currency must not leak into a yen field.
pub(crate) fn extract_jsonld_price(html: &str) -> Option<u64> {
    let script_re = Regex::new(
        r#"(?is)<script[^>]+type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#,
    )
    .expect("valid regex");

    for cap in script_re.captures_iter(html) {
        let Some(json_text) = cap.get(1) else {
            continue;
        };
        let Ok(value) = serde_json::from_str::<Value>(json_text.as_str()) else {
            continue;
        };

        // Top-level object, array, or @graph container.
        let mut candidates: Vec<&Value> = match value.as_array() {
            Some(items) => items.iter().collect(),
            None => vec![&value],
        };
        let mut expanded = Vec::new();
        for item in &candidates {
            if let Some(graph) = item.get("@graph").and_then(Value::as_array) {
                expanded.extend(graph.iter());
            }
        }
        candidates.extend(expanded);

        for item in candidates {
            if let Some(price) = item_price(item) {
                return Some(price);
            }
        }
    }

    None
}

/// Price of one JSON-LD item: variant offers first, then its own offers.
fn item_price(item: &Value) -> Option<u64> {
    if let Some(variants) = item.get("hasVariant").and_then(Value::as_array) {
        for variant in variants {
            if let Some(price) = variant.get("offers").and_then(offers_price) {
                return Some(price);
            }
        }
    }
    item.get("offers").and_then(offers_price)
}

/// `offers` may be a single object or an array of them.
fn offers_price(offers: &Value) -> Option<u64> {
    match offers {
        Value::Array(items) => items.iter().find_map(offer_price),
        single => offer_price(single),
    }
}

fn offer_price(offer: &Value) -> Option<u64> {
    if let Some(currency) = offer.get("priceCurrency").and_then(Value::as_str) {
        if !currency.eq_ignore_ascii_case("JPY") {
            return None;
        }
    }
    offer.get("price").and_then(price_value_to_yen)
}

/// `price` shows up as a number, an integer-valued float, or a string —
/// sometimes with separators — in the wild.
fn price_value_to_yen(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    if let Some(f) = value.as_f64() {
        if f.is_finite() && f >= 0.0 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            return Some(f.trunc() as u64);
        }
        return None;
    }
    value.as_str().and_then(|s| {
        // Stop at a decimal point so "1980.00" stays 1980.
        let whole = s.split('.').next().unwrap_or(s);
        parse_yen_digits(whole)
    })
}
