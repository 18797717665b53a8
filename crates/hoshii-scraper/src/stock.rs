//! Tri-state stock classification from raw product HTML.
//!
//! Negative vocabulary is checked first and wins: an out-of-stock banner
//! can coexist with cached or static buy-button markup, and a false
//! "in stock" report is the worst possible outcome for a price-drop
//! notifier. `Unknown` is a valid terminal answer, not an error.
//!
//! The vocabularies live here as const tables so the browser-extension
//! content scripts can mirror them verbatim.

use hoshii_core::StockStatus;

/// Amazon out-of-stock vocabulary. Checked before any positive signal.
const AMAZON_OUT_OF_STOCK: &[&str] = &[
    "在庫切れ",
    "現在在庫切れです",
    "この商品は現在お取り扱いできません",
    "入荷時期は未定です",
];

/// Amazon in-stock signals: availability text or the cart button anchor.
const AMAZON_IN_STOCK: &[&str] = &["在庫あり", r#"id="add-to-cart-button""#, "カートに入れる"];

const RAKUTEN_OUT_OF_STOCK: &[&str] = &["売り切れ", "在庫なし", "完売しました", "販売期間外"];

const RAKUTEN_IN_STOCK: &[&str] = &[
    "買い物かごに入れる",
    "かごに追加",
    "購入手続きへ",
    "在庫あり",
];

const GENERIC_OUT_OF_STOCK: &[&str] = &[
    "在庫切れ",
    "売り切れ",
    "再入荷待ち",
    "入荷待ち",
    "sold out",
    "out of stock",
];

const GENERIC_IN_STOCK: &[&str] = &[
    "在庫あり",
    "カートに入れる",
    "カートに追加",
    "購入する",
    "add to cart",
    "in stock",
    "buy now",
];

/// Classify an Amazon product document.
#[must_use]
pub fn classify_amazon(html: &str) -> StockStatus {
    classify_with(html, AMAZON_OUT_OF_STOCK, AMAZON_IN_STOCK)
}

/// Classify a Rakuten product document.
#[must_use]
pub fn classify_rakuten(html: &str) -> StockStatus {
    classify_with(html, RAKUTEN_OUT_OF_STOCK, RAKUTEN_IN_STOCK)
}

/// Classify an arbitrary product document.
#[must_use]
pub fn classify_generic(html: &str) -> StockStatus {
    classify_with(html, GENERIC_OUT_OF_STOCK, GENERIC_IN_STOCK)
}

/// Ordered rule evaluation: negatives first, then positives, else Unknown.
///
/// Vocabulary entries are lowercase (Japanese text is unaffected by the
/// lowercasing; Latin markers like "Sold Out" are matched case-insensitively
/// through it).
fn classify_with(html: &str, negative: &[&str], positive: &[&str]) -> StockStatus {
    let lower = html.to_lowercase();
    if negative.iter().any(|phrase| lower.contains(phrase)) {
        return StockStatus::OutOfStock;
    }
    if positive.iter().any(|phrase| lower.contains(phrase)) {
        return StockStatus::InStock;
    }
    StockStatus::Unknown
}
