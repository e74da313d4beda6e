//! Language-variant collapse post-pass (C10).
//!
//! Grounded in `postprocess.collapse_language_variants`'s bucket-by-
//! `(scheme, host, rest)` algorithm.

use std::collections::{HashMap, HashSet};

use url::Url;

use crate::patterns::ParsingPatterns;

/// Collapse per-language URL variants, keeping only non-default-language
/// variants within a bucket when any exist.
///
/// `urls` must be in a deterministic order (sorted) before this call: when
/// two distinct URLs collide on the same bucket key with no non-default-
/// language alternative, whichever is seen last wins, and an unordered
/// input would make that tie-break nondeterministic across runs.
#[must_use]
pub fn collapse_language_variants(
    urls: &[String],
    default_languages: &[String],
    patterns: &ParsingPatterns,
) -> Vec<String> {
    let defaults: HashSet<String> = default_languages.iter().map(|l| l.to_lowercase()).collect();

    let mut buckets: HashMap<(String, String, String), HashMap<String, String>> = HashMap::new();
    let mut assets: Vec<String> = Vec::new();

    for url in urls {
        let lower = url.to_lowercase();
        if patterns.asset_extensions.iter().any(|ext| lower.ends_with(&format!(".{ext}"))) {
            assets.push(url.clone());
            continue;
        }

        let Ok(parsed) = Url::parse(url) else {
            assets.push(url.clone());
            continue;
        };
        let path = parsed.path();
        let path = if path.is_empty() { "/" } else { path };

        let (lang, rest) = split_lang(path, patterns);
        let rest = if rest != "/" { rest.trim_end_matches('/').to_string() } else { rest };

        let key = (
            parsed.scheme().to_string(),
            parsed.host_str().unwrap_or_default().to_lowercase(),
            rest,
        );
        buckets.entry(key).or_default().insert(lang, url.clone());
    }

    let mut out: Vec<String> = Vec::new();
    for language_map in buckets.into_values() {
        let non_default: Vec<String> = language_map
            .iter()
            .filter(|(lang, _)| !lang.is_empty() && !defaults.contains(*lang))
            .map(|(_, url)| url.clone())
            .collect();

        if non_default.is_empty() {
            out.extend(language_map.into_values());
        } else {
            out.extend(non_default);
        }
    }
    out.extend(assets);

    let mut deduped: HashSet<String> = out.into_iter().collect();
    let mut result: Vec<String> = deduped.drain().collect();
    result.sort();
    result
}

fn split_lang(path: &str, patterns: &ParsingPatterns) -> (String, String) {
    if path.is_empty() {
        return (String::new(), String::new());
    }
    let Some(m) = patterns.language_segment.find(path) else {
        return (String::new(), path.to_string());
    };
    let Some(captures) = patterns.language_segment.captures(path) else {
        return (String::new(), path.to_string());
    };
    let lang = captures
        .get(1)
        .map_or_else(String::new, |g| g.as_str().to_lowercase());
    let rest = &path[m.end() - 1..];
    (lang, rest.to_string())
}

#[cfg(test)]
#[path = "postprocess_test.rs"]
mod tests;
