//! Shared text primitives for HTML extraction.
//!
//! All extractors work on raw HTML strings, so the same small set of
//! cleanup routines is needed everywhere: entity decoding, whitespace
//! collapsing, site-suffix stripping, and yen-amount parsing.

use regex::Regex;

/// Trailing-suffix separators commonly used between a product name and the
/// site name in `<title>` text.
const TITLE_SEPARATORS: &[&str] = &[" - ", " | ", " – ", " — ", "｜"];

/// Returns the first capture group of `pattern` applied to `html`.
///
/// Patterns are compiled per call; extraction runs once per page, so the
/// compile cost is irrelevant next to the network fetch.
pub(crate) fn capture_first(html: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).expect("valid regex");
    re.captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// Decode the handful of HTML entities that actually show up in product
/// titles. Full entity tables are overkill for `<title>` cleanup.
pub(crate) fn decode_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&nbsp;", " ")
}

/// Collapse runs of whitespace (including newlines) into single spaces and
/// trim the ends.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip a trailing "site name" suffix from a page title.
///
/// Only the rightmost separator is considered, so `"Widget - 2pack | Shop"`
/// keeps its inner dash and loses only `"| Shop"`. When stripping would
/// leave nothing, the title is returned unchanged.
pub(crate) fn strip_site_suffix(title: &str) -> String {
    let rightmost = TITLE_SEPARATORS
        .iter()
        .filter_map(|sep| title.rfind(sep).map(|pos| (pos, sep.len())))
        .max_by_key(|(pos, _)| *pos);

    match rightmost {
        Some((pos, _)) if !title[..pos].trim().is_empty() => title[..pos].trim().to_string(),
        _ => title.trim().to_string(),
    }
}

/// Extract the `content` of a `<meta>` tag by its `property`/`name`.
///
/// Both attribute orders occur in the wild (`property` first or `content`
/// first), so both are tried.
pub(crate) fn meta_content(html: &str, property: &str) -> Option<String> {
    let escaped = regex::escape(property);
    let patterns = [
        format!(
            r#"(?is)<meta[^>]+(?:property|name)\s*=\s*["']{escaped}["'][^>]*content\s*=\s*["']([^"']+)["']"#
        ),
        format!(
            r#"(?is)<meta[^>]+content\s*=\s*["']([^"']+)["'][^>]*(?:property|name)\s*=\s*["']{escaped}["']"#
        ),
    ];
    patterns
        .iter()
        .find_map(|pattern| capture_first(html, pattern))
}

/// Parse a yen amount out of matched text by stripping thousands separators
/// and keeping ASCII digits only. Empty input parses to `None`, never `0`.
pub(crate) fn parse_yen_digits(s: &str) -> Option<u64> {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_common_entities() {
        assert_eq!(
            decode_entities("Tom &amp; Jerry &quot;DX&quot;&nbsp;&#39;24"),
            "Tom & Jerry \"DX\" '24"
        );
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(
            collapse_whitespace("  Widget\n   Pro\t2000  "),
            "Widget Pro 2000"
        );
    }

    #[test]
    fn strips_rightmost_site_suffix_only() {
        assert_eq!(
            strip_site_suffix("Widget - 2pack | ShopName"),
            "Widget - 2pack"
        );
        assert_eq!(strip_site_suffix("ウィジェット｜お店"), "ウィジェット");
        assert_eq!(strip_site_suffix("Widget – Example Store"), "Widget");
        assert_eq!(strip_site_suffix("Widget — Example Store"), "Widget");
    }

    #[test]
    fn keeps_title_without_separator() {
        assert_eq!(strip_site_suffix("Plain Widget"), "Plain Widget");
    }

    #[test]
    fn keeps_title_when_stripping_would_empty_it() {
        assert_eq!(strip_site_suffix(" - ShopName"), "- ShopName");
    }

    #[test]
    fn parses_yen_with_separators() {
        assert_eq!(parse_yen_digits("1,980"), Some(1980));
        assert_eq!(parse_yen_digits("12,345,678"), Some(12_345_678));
    }

    #[test]
    fn empty_input_is_none_not_zero() {
        assert_eq!(parse_yen_digits(""), None);
        assert_eq!(parse_yen_digits("円"), None);
    }

    #[test]
    fn meta_content_handles_both_attribute_orders() {
        let property_first = r#"<meta property="og:image" content="https://img.example.com/a.jpg">"#;
        assert_eq!(
            meta_content(property_first, "og:image").as_deref(),
            Some("https://img.example.com/a.jpg")
        );

        let content_first = r#"<meta content="https://img.example.com/b.jpg" property="og:image">"#;
        assert_eq!(
            meta_content(content_first, "og:image").as_deref(),
            Some("https://img.example.com/b.jpg")
        );
    }

    #[test]
    fn meta_content_matches_name_attribute_too() {
        let html = r#"<meta name="og:title" content="Widget">"#;
        assert_eq!(meta_content(html, "og:title").as_deref(), Some("Widget"));
    }

    #[test]
    fn capture_first_returns_first_group() {
        assert_eq!(
            capture_first("<b>abc</b>", r"<b>([a-z]+)</b>").as_deref(),
            Some("abc")
        );
        assert_eq!(capture_first("<b>123</b>", r"<i>([a-z]+)</i>"), None);
    }
}
