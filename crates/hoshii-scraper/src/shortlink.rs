//! Short-link expansion with a final-destination guard.
//!
//! `amzn.to`-style links mask their true destination, so they are expanded
//! with one guarded redirect-following GET before classification. The
//! expansion is only trusted when the FINAL hostname lands on a supported
//! commerce domain — a trusted-looking short domain must not become an
//! open-redirect pivot into arbitrary (or internal) hosts.

use url::Url;

use crate::urlcheck::{AMAZON_HOSTS, RAKUTEN_HOSTS};

/// Short-link services we expand. Anything else is rejected before any
/// network traffic happens.
pub const SHORT_LINK_HOSTS: &[&str] = &["amzn.to", "amzn.asia", "a.r10.to"];

/// True when the URL's host is one of the known short-link services.
#[must_use]
pub fn is_short_link(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.host_str()
                .map(|h| SHORT_LINK_HOSTS.iter().any(|s| *s == h))
        })
        .unwrap_or(false)
}

/// True when an expanded destination host is a legitimate target.
///
/// Exact equality against the commerce allow-lists, same rule as
/// [`crate::urlcheck::classify`].
pub(crate) fn is_allowed_expansion(host: &str) -> bool {
    AMAZON_HOSTS
        .iter()
        .chain(RAKUTEN_HOSTS)
        .any(|h| *h == host)
}

/// Expand a short link to its final destination URL.
///
/// Returns `None` — never an error — when:
/// - the host is not a known short-link service,
/// - the fetch fails (network error, timeout),
/// - redirects resolve to a host outside the commerce allow-lists,
///   regardless of HTTP status.
///
/// Follows redirects up to the client's default cap. Sent with a mobile
/// user agent: some short-link targets vary behavior by client.
pub async fn expand(
    client: &reqwest::Client,
    mobile_user_agent: &str,
    url: &str,
) -> Option<String> {
    if !is_short_link(url) {
        tracing::debug!(url, "not a known short-link host; refusing to expand");
        return None;
    }

    let response = match client
        .get(url)
        .header(reqwest::header::USER_AGENT, mobile_user_agent)
        .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            tracing::debug!(url, error = %err, "short-link expansion fetch failed");
            return None;
        }
    };

    // response.url() is the URL after redirect following — the only one
    // that matters for validation.
    validate_expansion(url, response.url())
}

/// Accept an expansion only when the final host is a legitimate commerce
/// target. The HTTP status is irrelevant: a 200 from a disallowed host is
/// still a failed expansion.
fn validate_expansion(short_url: &str, final_url: &Url) -> Option<String> {
    let final_host = final_url.host_str()?;
    if !is_allowed_expansion(final_host) {
        tracing::warn!(
            short_url,
            final_host,
            "short link resolved outside the commerce allow-list"
        );
        return None;
    }
    Some(final_url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_short_link_hosts() {
        assert!(is_short_link("https://amzn.to/3xYzAbC"));
        assert!(is_short_link("https://amzn.asia/d/abc123"));
        assert!(is_short_link("https://a.r10.to/hXYZab"));
    }

    #[test]
    fn rejects_other_hosts_and_garbage() {
        assert!(!is_short_link("https://bit.ly/3xYzAbC"));
        assert!(!is_short_link("https://www.amazon.co.jp/dp/B000123456"));
        assert!(!is_short_link("not a url"));
    }

    #[test]
    fn lookalike_short_host_is_rejected() {
        assert!(!is_short_link("https://amzn.to.attacker.example/x"));
    }

    #[test]
    fn allowed_expansion_targets_are_the_commerce_hosts() {
        assert!(is_allowed_expansion("www.amazon.co.jp"));
        assert!(is_allowed_expansion("item.rakuten.co.jp"));
        assert!(!is_allowed_expansion("evil.example.com"));
        // The short host itself is not a valid final destination.
        assert!(!is_allowed_expansion("amzn.to"));
    }

    #[test]
    fn pivot_to_a_non_allow_listed_host_fails_the_expansion() {
        // Even a successfully-served destination is rejected when the
        // redirect chain lands outside the commerce allow-list.
        let pivoted = Url::parse("https://evil.example.com/landing").unwrap();
        assert_eq!(validate_expansion("https://amzn.to/x", &pivoted), None);

        let legit = Url::parse("https://www.amazon.co.jp/dp/B000123456").unwrap();
        assert_eq!(
            validate_expansion("https://amzn.to/x", &legit).as_deref(),
            Some("https://www.amazon.co.jp/dp/B000123456")
        );
    }

    #[test]
    fn rakuten_short_links_validate_against_rakuten_hosts() {
        let target = Url::parse("https://item.rakuten.co.jp/shop/goods-1/").unwrap();
        assert!(validate_expansion("https://a.r10.to/x", &target).is_some());
    }

    #[tokio::test]
    async fn expand_refuses_non_short_hosts_without_network() {
        // example.invalid never resolves; reaching the network would error
        // differently than the immediate None this must produce.
        let client = reqwest::Client::new();
        let result = expand(&client, "mobile-ua", "https://example.invalid/abc").await;
        assert_eq!(result, None);
    }
}
