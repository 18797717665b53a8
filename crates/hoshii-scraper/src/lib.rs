//! Scraping & extraction core for the wishlist tracker.
//!
//! Converts a product-page URL into a normalized [`hoshii_core::ScrapeResult`]
//! under adversarial conditions: bot walls, layout drift, SSRF attempts,
//! redirect chains. The public entry point is [`Scraper::scrape`], which
//! never returns an error — every failure mode degrades into a well-formed
//! diagnostic result.
//!
//! The per-site heuristics are exposed as pure `&str -> _` functions
//! (`sites::amazon::extract_from_html` etc.) so the same pattern tables can
//! run against fetched HTML here and against a serialized live DOM in the
//! browser extension.

pub mod error;
mod fetch;
pub mod generic;
pub mod scrape;
pub mod shortlink;
pub mod sites;
pub mod stock;
mod text;
pub mod urlcheck;

pub use error::FetchError;
pub use scrape::Scraper;
pub use urlcheck::{classify, sanitize_generic, UrlClassification};
