//! Scrape orchestrator: one URL in, one normalized result out.
//!
//! Linear state machine, no retries — retry/cooldown policy belongs to the
//! external batch driver, and hammering a bot-walled target only deepens
//! the block. The public contract never raises; every path terminates in a
//! well-formed [`ScrapeResult`].

use std::time::Duration;

use hoshii_core::{AppConfig, ScrapeResult, Source};

use crate::error::FetchError;
use crate::{generic, shortlink, sites, urlcheck};

const SHORT_LINK_NOTE: &str = "短縮URLを展開できませんでした。URLを確認してください。";
const INVALID_URL_NOTE: &str = "URLを解釈できませんでした。";
const BLOCKED_URL_NOTE: &str = "このURLは取得対象にできません。";

/// The scraping core. Owns the one HTTP client; otherwise stateless —
/// every call computes everything fresh, so concurrent use is bounded only
/// by the caller's politeness requirements.
pub struct Scraper {
    client: reqwest::Client,
    config: AppConfig,
}

impl Scraper {
    /// Build a scraper from application config.
    ///
    /// Redirect following stays on the client default (cap 10) — the
    /// short-link expander depends on it.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g. invalid TLS config). This is the only
    /// fallible operation in the crate's public surface.
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.scrape_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Scrape one product URL into a normalized result. Never raises.
    ///
    /// Route: short-link expansion (if applicable) → classification →
    /// site-specific extractor or generic fallback.
    pub async fn scrape(&self, url: &str) -> ScrapeResult {
        let url = if shortlink::is_short_link(url) {
            match shortlink::expand(&self.client, &self.config.mobile_user_agent, url).await {
                Some(expanded) => {
                    tracing::debug!(short = url, expanded = %expanded, "short link expanded");
                    expanded
                }
                // Terminal: no further steps once expansion fails.
                None => return ScrapeResult::diagnostic(Source::Other, SHORT_LINK_NOTE),
            }
        } else {
            url.to_string()
        };

        let classification = urlcheck::classify(&url);
        match (classification.is_valid, classification.source) {
            (true, Source::Amazon) => {
                sites::amazon::extract(&self.client, &self.config, &classification.sanitized_url)
                    .await
            }
            (true, Source::Rakuten) => {
                sites::rakuten::extract(&self.client, &self.config, &classification.sanitized_url)
                    .await
            }
            _ => {
                let generic_class = urlcheck::sanitize_generic(&url);
                if generic_class.is_valid {
                    generic::extract(
                        &self.client,
                        &self.config,
                        &generic_class.sanitized_url,
                        &generic_class.hostname,
                    )
                    .await
                } else if generic_class.hostname.is_empty() {
                    ScrapeResult::diagnostic(Source::Other, INVALID_URL_NOTE)
                } else {
                    // Parsed fine but pointed somewhere we refuse to fetch.
                    tracing::warn!(
                        hostname = %generic_class.hostname,
                        "rejected private/internal scrape target"
                    );
                    ScrapeResult::diagnostic(Source::Other, BLOCKED_URL_NOTE)
                }
            }
        }
    }
}
