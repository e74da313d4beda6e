//! URL canonicalization shared by every component that emits URLs.
//!
//! Grounded in `url_discovery/core/normalize.py`'s `normalize_link` /
//! `canonical_netloc` / `same_domain`, translated onto [`url::Url`] for RFC
//! 3986 resolution rather than hand-rolled string splitting.

use url::Url;

use crate::patterns::ParsingPatterns;

const REJECTED_PREFIXES: &[&str] = &["mailto:", "tel:", "javascript:", "data:", "about:blank", "#"];

/// Canonicalize `href` against `base_url`, returning `None` to signal "drop".
///
/// `href` may be empty or absent in the caller's source data; pass an empty
/// string for the latter. Byte input should be decoded lossily before
/// calling, per the design note converging bytes-or-string at the API
/// boundary.
#[must_use]
pub fn normalize_link(base_url: &str, href: &str, patterns: &ParsingPatterns) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let lower = href.to_lowercase();
    if REJECTED_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return None;
    }

    let mut href = href.replace("\\/", "/");

    if href.starts_with("//") {
        let base_scheme = Url::parse(base_url).ok().map_or_else(
            || if patterns.prefer_https { "https" } else { "http" }.to_string(),
            |u| u.scheme().to_string(),
        );
        href = format!("{base_scheme}:{href}");
    }

    if href.len() > patterns.max_url_length || href.contains('\\') {
        return None;
    }

    let base = Url::parse(base_url).ok()?;
    let mut resolved = base.join(&href).ok()?;
    resolved.set_fragment(None);

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    let host = resolved.host_str()?.to_lowercase();
    let port = resolved.port();
    let (scheme, netloc) = canonical_netloc(resolved.scheme(), &host, port, patterns);

    let mut path = resolved.path().to_string();
    if path.is_empty() {
        path = "/".to_string();
    }
    if path != "/" {
        while path.contains("//") {
            path = path.replace("//", "/");
        }
    }

    let mut pairs: Vec<(String, String)> = Vec::new();
    for (k, v) in resolved.query_pairs() {
        let kl = k.to_lowercase();
        if patterns.asset_extensions.contains(&kl) || patterns.pagination_hints.contains(&kl) {
            continue;
        }
        pairs.push((k.into_owned(), v.into_owned()));
    }

    let query = if pairs.is_empty() {
        String::new()
    } else {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs.iter())
            .finish()
    };

    let mut out = format!("{scheme}://{netloc}{path}");
    if !query.is_empty() {
        out.push('?');
        out.push_str(&query);
    }

    if out.len() > patterns.max_url_length {
        return None;
    }

    Some(out)
}

/// Lowercase host, optionally strip a `www.` prefix, strip the default port
/// matching the effective scheme, and rewrite the scheme to `https` when
/// `prefer_https` is set.
#[must_use]
pub fn canonical_netloc(
    scheme: &str,
    host: &str,
    port: Option<u16>,
    patterns: &ParsingPatterns,
) -> (&'static str, String) {
    let mut host = host.to_lowercase();
    if patterns.strip_www {
        if let Some(stripped) = host.strip_prefix("www.") {
            host = stripped.to_string();
        }
    }

    let effective_scheme = if patterns.prefer_https { "https" } else { scheme };
    let scheme_out = if effective_scheme == "https" { "https" } else { "http" };

    let netloc = match port {
        Some(80) if scheme_out == "http" => host,
        Some(443) if scheme_out == "https" => host,
        Some(p) => format!("{host}:{p}"),
        None => host,
    };

    (scheme_out, netloc)
}

/// Whether `url`'s host is in-scope relative to `root_netloc`.
///
/// Mirrors the original's asymmetric `www.` rule: a bare root accepts a
/// `www.`-prefixed candidate whose stripped form matches, even when
/// `include_subdomains` is false.
#[must_use]
pub fn same_domain(url: &str, root_netloc: &str, include_subdomains: bool) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let netloc = host.to_lowercase();
    let root = root_netloc.to_lowercase();

    if !root.starts_with("www.") {
        if let Some(stripped) = netloc.strip_prefix("www.") {
            if stripped == root {
                return true;
            }
        }
    }

    netloc == root || (include_subdomains && netloc.ends_with(&format!(".{root}")))
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
