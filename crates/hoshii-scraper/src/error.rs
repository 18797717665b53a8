use thiserror::Error;

/// Fetch-layer errors. Internal to the crate's plumbing: extractors catch
/// these and convert them into diagnostic [`hoshii_core::ScrapeResult`]s,
/// so nothing here ever crosses the orchestrator boundary. The one public
/// appearance is [`crate::Scraper::new`], where client construction itself
/// can fail.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },
}
