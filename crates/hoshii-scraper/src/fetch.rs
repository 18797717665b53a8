//! HTTP helpers shared by the extractors.
//!
//! One GET per scrape call. Headers are tuned so Japanese storefronts serve
//! JPY pricing and Japanese-language markup instead of a geo-redirect.

use crate::error::FetchError;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE_JA: &str = "ja-JP,ja;q=0.9,en;q=0.5";

/// Fetch the HTML body of a product page.
///
/// # Errors
///
/// - [`FetchError::Http`] — network failure or timeout.
/// - [`FetchError::Status`] — reachable but non-2xx. Bot walls served with
///   a 200 are NOT detected here; that is the extractors' job, because the
///   fingerprints are site-specific.
pub(crate) async fn fetch_html(
    client: &reqwest::Client,
    url: &str,
    user_agent: &str,
) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, user_agent)
        .header(reqwest::header::ACCEPT, ACCEPT_HTML)
        .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_JA)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    Ok(response.text().await?)
}
