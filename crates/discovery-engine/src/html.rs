//! Regex-based link extraction (C3).
//!
//! Grounded in `brand_newsroom::html::extract_links`: no DOM/CSS-selector
//! crate, just targeted `regex` over the raw markup. Tolerant of malformed
//! HTML because a regex never raises on an unbalanced tag the way a strict
//! parser would.

use std::collections::HashSet;

use regex::Regex;

use crate::classify::is_probably_html_url;
use crate::normalize::normalize_link;
use crate::patterns::ParsingPatterns;

const ASSET_TAGS: &[(&str, &str)] = &[
    ("img", "src"),
    ("script", "src"),
    ("iframe", "src"),
    ("source", "src"),
    ("video", "src"),
    ("audio", "src"),
];

/// Extract, normalize, and (when `html_only`) classify-filter every outgoing
/// link reachable from `html`.
#[must_use]
pub fn extract_links(
    base_url: &str,
    html: &str,
    include_assets: bool,
    html_only: bool,
    patterns: &ParsingPatterns,
) -> HashSet<String> {
    let mut out = HashSet::new();
    let mut add = |raw: &str| {
        let Some(normalized) = normalize_link(base_url, raw, patterns) else {
            return;
        };
        if html_only && !is_probably_html_url(&normalized, patterns) {
            return;
        }
        out.insert(normalized);
    };

    let href_re = Regex::new(r#"(?is)<(?:a|link)\b[^>]*\bhref\s*=\s*["']([^"']*)["']"#)
        .expect("valid href regex");
    for cap in href_re.captures_iter(html) {
        add(cap.get(1).map_or("", |m| m.as_str()));
    }

    let rel_next_re =
        Regex::new(r#"(?is)<(?:a|link)\b[^>]*\brel\s*=\s*["'][^"']*\bnext\b[^"']*["'][^>]*\bhref\s*=\s*["']([^"']*)["']"#)
            .expect("valid rel-next regex");
    for cap in rel_next_re.captures_iter(html) {
        add(cap.get(1).map_or("", |m| m.as_str()));
    }
    let aria_next_re = Regex::new(
        r#"(?is)<a\b[^>]*\baria-label\s*=\s*["'][^"']*next[^"']*["'][^>]*\bhref\s*=\s*["']([^"']*)["']"#,
    )
    .expect("valid aria-label next regex");
    for cap in aria_next_re.captures_iter(html) {
        add(cap.get(1).map_or("", |m| m.as_str()));
    }

    if include_assets && !html_only {
        for (tag, attr) in ASSET_TAGS {
            let re = Regex::new(&format!(r#"(?is)<{tag}\b[^>]*\b{attr}\s*=\s*["']([^"']*)["']"#))
                .expect("valid asset tag regex");
            for cap in re.captures_iter(html) {
                add(cap.get(1).map_or("", |m| m.as_str()));
            }
        }

        let srcset_re =
            Regex::new(r#"(?is)\bsrcset\s*=\s*["']([^"']*)["']"#).expect("valid srcset regex");
        for cap in srcset_re.captures_iter(html) {
            let srcset = cap.get(1).map_or("", |m| m.as_str());
            for part in srcset.split(',') {
                if let Some(token) = part.trim().split_whitespace().next() {
                    add(token);
                }
            }
        }
    }

    let script_re =
        Regex::new(r"(?is)<script\b[^>]*>(.*?)</script>").expect("valid script body regex");
    for cap in script_re.captures_iter(html) {
        let content = cap.get(1).map_or("", |m| m.as_str());
        for m in patterns.url_in_text.captures_iter(content) {
            if let Some(u) = m.name("u") {
                add(u.as_str());
            }
        }
    }

    out
}

#[cfg(test)]
#[path = "html_test.rs"]
mod tests;
