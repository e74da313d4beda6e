//! HTML-likeness classifier (C4): pure function over [`ParsingPatterns`].

use crate::patterns::ParsingPatterns;

/// Whether `url` looks like it resolves to an HTML page rather than an API
/// endpoint or a static asset.
#[must_use]
pub fn is_probably_html_url(url: &str, patterns: &ParsingPatterns) -> bool {
    if url.is_empty() {
        return false;
    }
    if patterns.non_html_api.is_match(url) {
        return false;
    }
    let lower = url.to_lowercase();
    patterns
        .asset_extensions
        .iter()
        .all(|ext| !lower.ends_with(&format!(".{ext}")) && !lower.contains(&format!(".{ext}?")))
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
