//! URL classification and sanitization.
//!
//! Two paths with different strictness:
//!
//! - [`classify`] decides whether a URL belongs to one of the supported
//!   commerce sites. Hostname matching is EXACT string equality against a
//!   fixed allow-list. `contains`/substring checks are forbidden here —
//!   `evil-amazon.co.jp.attacker.example` must never classify as Amazon.
//! - [`sanitize_generic`] is the permissive path for arbitrary sites. It
//!   accepts any public `http`/`https` host but rejects loopback, RFC1918,
//!   link-local and `.local`-style hostnames so a stored wishlist URL can
//!   never steer the server into internal infrastructure.
//!
//! Both rebuild `sanitized_url` from parsed components. The raw input
//! string is never substring-edited.

use url::{Host, Url};

use hoshii_core::Source;

/// Hostnames accepted as Amazon product pages. `https` only.
pub const AMAZON_HOSTS: &[&str] = &[
    "www.amazon.co.jp",
    "amazon.co.jp",
    "www.amazon.jp",
    "amazon.jp",
];

/// Hostnames accepted as Rakuten product pages. `https` only.
pub const RAKUTEN_HOSTS: &[&str] = &[
    "item.rakuten.co.jp",
    "www.rakuten.co.jp",
    "rakuten.co.jp",
    "books.rakuten.co.jp",
];

/// Outcome of parsing and classifying one input URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlClassification {
    pub is_valid: bool,
    pub source: Source,
    pub hostname: String,
    pub sanitized_url: String,
}

impl UrlClassification {
    /// Unparseable input: empty hostname, empty sanitized URL.
    fn invalid() -> Self {
        Self {
            is_valid: false,
            source: Source::Other,
            hostname: String::new(),
            sanitized_url: String::new(),
        }
    }
}

/// Classify a URL against the supported-site allow-lists.
///
/// `is_valid` is true only for an exact-equality hostname match over
/// `https`. Everything else — unknown hosts, lookalike hosts, `http` to a
/// supported host — comes back `is_valid: false, source: Other`; whether
/// the generic path may fetch it is a separate decision
/// ([`sanitize_generic`]).
#[must_use]
pub fn classify(url: &str) -> UrlClassification {
    let Ok(parsed) = Url::parse(url) else {
        return UrlClassification::invalid();
    };
    let Some(hostname) = parsed.host_str().map(str::to_string) else {
        return UrlClassification::invalid();
    };
    let sanitized_url = rebuild(&parsed);

    if parsed.scheme() == "https" {
        if AMAZON_HOSTS.iter().any(|h| *h == hostname) {
            return UrlClassification {
                is_valid: true,
                source: Source::Amazon,
                hostname,
                sanitized_url,
            };
        }
        if RAKUTEN_HOSTS.iter().any(|h| *h == hostname) {
            return UrlClassification {
                is_valid: true,
                source: Source::Rakuten,
                hostname,
                sanitized_url,
            };
        }
    }

    UrlClassification {
        is_valid: false,
        source: Source::Other,
        hostname,
        sanitized_url,
    }
}

/// Permissive sanitization for arbitrary sites, with an SSRF guard.
///
/// Accepts `http`/`https` to any public host. Private, loopback,
/// link-local and mDNS-style hostnames are rejected — when rejected for
/// that reason the `hostname` field is still populated so callers can
/// distinguish "unparseable" from "blocked".
#[must_use]
pub fn sanitize_generic(url: &str) -> UrlClassification {
    let Ok(parsed) = Url::parse(url) else {
        return UrlClassification::invalid();
    };
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return UrlClassification::invalid();
    }
    let Some(host) = parsed.host() else {
        return UrlClassification::invalid();
    };
    let hostname = host.to_string();
    let blocked = is_private_host(&host);
    let sanitized_url = rebuild(&parsed);

    UrlClassification {
        is_valid: !blocked,
        source: Source::Other,
        hostname,
        sanitized_url,
    }
}

/// Rebuild `scheme://host[:port]/path?query` from parsed components.
///
/// The fragment is dropped; the parser has already lowercased the scheme
/// and domain. Reconstruction (rather than editing the input string) is
/// what makes sanitization idempotent.
fn rebuild(url: &Url) -> String {
    let mut out = format!("{}://{}", url.scheme(), url.host_str().unwrap_or(""));
    if let Some(port) = url.port() {
        out.push(':');
        out.push_str(&port.to_string());
    }
    out.push_str(url.path());
    if let Some(query) = url.query() {
        out.push('?');
        out.push_str(query);
    }
    out
}

/// True for hosts a server-side fetch must never touch: loopback, RFC1918,
/// link-local, unspecified, and local-only name suffixes.
fn is_private_host(host: &Host<&str>) -> bool {
    match host {
        Host::Domain(domain) => {
            let lower = domain.to_ascii_lowercase();
            lower == "localhost"
                || lower.ends_with(".localhost")
                || lower.ends_with(".local")
                || lower.ends_with(".internal")
        }
        Host::Ipv4(ip) => {
            ip.is_loopback() || ip.is_private() || ip.is_link_local() || ip.is_unspecified()
        }
        Host::Ipv6(ip) => {
            ip.is_loopback()
                || ip.is_unspecified()
                // fc00::/7 unique-local
                || (ip.segments()[0] & 0xfe00) == 0xfc00
                // fe80::/10 link-local
                || (ip.segments()[0] & 0xffc0) == 0xfe80
        }
    }
}
