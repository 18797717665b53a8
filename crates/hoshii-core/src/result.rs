//! The normalized product record produced by one scrape call.
//!
//! ## Field semantics observed from live product pages
//!
//! ### `price`
//! Whole-yen integer. `None` means "no price pattern matched", which is a
//! common, legitimate outcome (bot wall, layout drift, price only rendered
//! client-side). It must never be collapsed to `0` — a page that really
//! sells something for 0 yen does not exist, but a page whose price we
//! failed to find does, constantly.
//!
//! ### `name`
//! Never empty. When the page was fetched but no name anchor matched we use
//! [`NAME_PLACEHOLDER`]; when the fetch itself failed we use
//! [`FETCH_FAILED_NAME`] so the UI has something to render either way.
//!
//! ### `stock_status`
//! `Unknown` is the safe default. A false "in stock" notification is worse
//! than no notification, so classifiers only report `InStock`/`OutOfStock`
//! on explicit evidence.
//!
//! ### `note`
//! Advisory text surfaced verbatim to the end user (e.g. "Amazon blocked
//! the request, edit the price manually"). Presence of a note does not mean
//! the request failed.

use serde::{Deserialize, Serialize};

/// Diagnostic name used when the page could not be fetched at all.
pub const FETCH_FAILED_NAME: &str = "取得失敗";

/// Placeholder name used when the page was fetched but no name was found.
pub const NAME_PLACEHOLDER: &str = "商品名不明";

/// Coarse origin classification of a product URL.
///
/// Independent of extraction success: an Amazon URL that bot-walls us is
/// still `Amazon`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Amazon,
    Rakuten,
    Other,
}

impl Source {
    /// Human-readable site label for the supported sites.
    ///
    /// Generic sites derive their label from the hostname instead.
    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        match self {
            Source::Amazon => Some("Amazon"),
            Source::Rakuten => Some("楽天市場"),
            Source::Other => None,
        }
    }
}

/// Tri-state stock signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    Unknown,
}

/// Output of one scrape call. Transient — persistence belongs to the
/// item-store collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    pub name: String,
    pub price: Option<u64>,
    pub image_url: Option<String>,
    pub source: Source,
    pub source_name: Option<String>,
    pub stock_status: StockStatus,
    pub note: Option<String>,
}

impl ScrapeResult {
    /// Terminal diagnostic result: fetch-failed name, all fields
    /// null/unknown, and an advisory note explaining what happened.
    ///
    /// Every failure path in the scraper ends here — nothing throws past
    /// the orchestrator.
    #[must_use]
    pub fn diagnostic(source: Source, note: impl Into<String>) -> Self {
        Self {
            name: FETCH_FAILED_NAME.to_string(),
            price: None,
            image_url: None,
            source,
            source_name: source.label().map(str::to_string),
            stock_status: StockStatus::Unknown,
            note: Some(note.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_the_ui_wire_shape() {
        let result = ScrapeResult {
            name: "Widget".to_string(),
            price: Some(1980),
            image_url: Some("https://img.example.com/widget.jpg".to_string()),
            source: Source::Amazon,
            source_name: Some("Amazon".to_string()),
            stock_status: StockStatus::InStock,
            note: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["name"], "Widget");
        assert_eq!(json["price"], 1980);
        assert_eq!(json["imageUrl"], "https://img.example.com/widget.jpg");
        assert_eq!(json["source"], "amazon");
        assert_eq!(json["sourceName"], "Amazon");
        assert_eq!(json["stockStatus"], "in_stock");
        assert!(json["note"].is_null());
    }

    #[test]
    fn missing_price_serializes_as_null_not_zero() {
        let result = ScrapeResult {
            name: "Widget".to_string(),
            price: None,
            image_url: None,
            source: Source::Other,
            source_name: Some("Example".to_string()),
            stock_status: StockStatus::Unknown,
            note: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["price"].is_null(), "absent price must stay null");
        assert_eq!(json["stockStatus"], "unknown");
        assert_eq!(json["source"], "other");
    }

    #[test]
    fn diagnostic_result_is_well_formed() {
        let result = ScrapeResult::diagnostic(Source::Amazon, "ブロックされました");
        assert_eq!(result.name, FETCH_FAILED_NAME);
        assert!(!result.name.is_empty());
        assert_eq!(result.price, None);
        assert_eq!(result.image_url, None);
        assert_eq!(result.source, Source::Amazon);
        assert_eq!(result.source_name.as_deref(), Some("Amazon"));
        assert_eq!(result.stock_status, StockStatus::Unknown);
        assert_eq!(result.note.as_deref(), Some("ブロックされました"));
    }

    #[test]
    fn diagnostic_for_other_source_has_no_source_name() {
        let result = ScrapeResult::diagnostic(Source::Other, "x");
        assert_eq!(result.source_name, None);
    }

    #[test]
    fn round_trips_through_json() {
        let result = ScrapeResult {
            name: "ほしい物".to_string(),
            price: Some(500),
            image_url: None,
            source: Source::Rakuten,
            source_name: Some("楽天市場".to_string()),
            stock_status: StockStatus::OutOfStock,
            note: Some("価格が変動しています".to_string()),
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: ScrapeResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
