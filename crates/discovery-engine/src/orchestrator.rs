//! Orchestrator: base URL normalization, C8 → C9 fallback, C10 post-pass.

use std::collections::HashSet;

use discovery_core::{Config, ParsingConfig};
use tracing::info;

use crate::error::DiscoveryError;
use crate::patterns::ParsingPatterns;
use crate::postprocess::collapse_language_variants;
use crate::{crawler, sitemap_discovery};

/// Compile `ParsingPatterns`, surfacing a failed config load as a
/// [`DiscoveryError::Config`] rather than a bare `ConfigError`.
fn compile_patterns(config: &ParsingConfig) -> Result<ParsingPatterns, DiscoveryError> {
    Ok(ParsingPatterns::from_config(config)?)
}

/// Prefix a bare host with `https://` and strip a trailing slash.
///
/// Grounded in `url_utils.normalize_base_url`: lets the CLI accept
/// `"example.com"` as well as `"https://example.com/"`.
#[must_use]
pub fn normalize_base_url(url: &str) -> String {
    let with_scheme = if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    };
    with_scheme.trim_end_matches('/').to_string()
}

/// Discover URLs for `base_url`: try sitemap resolution first, fall back to
/// the HTML crawler if it yields nothing, then collapse language variants.
///
/// `skip_sitemap` runs the crawler directly, matching the CLI's
/// `--no-sitemap` flag.
pub async fn discover(base_url: &str, config: &Config, skip_sitemap: bool) -> Vec<String> {
    let base_url = normalize_base_url(base_url);
    let patterns = match compile_patterns(&config.parsing) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("failed to compile parsing patterns: {e}");
            return Vec::new();
        }
    };

    let mut urls: HashSet<String> = if skip_sitemap {
        HashSet::new()
    } else {
        sitemap_discovery::discover_sitemap_urls(&base_url, &config.sitemap)
            .await
            .into_iter()
            .collect()
    };

    if urls.is_empty() {
        info!("falling back to HTML crawl for {base_url}");
        urls = crawler::run(&base_url, config.crawler.clone(), patterns.clone())
            .await
            .into_iter()
            .collect();
    }

    urls.retain(|u| u.starts_with("http://") || u.starts_with("https://"));

    let mut sorted: Vec<String> = urls.into_iter().collect();
    sorted.sort();

    let mut result = if config.postprocess.collapse_language_variants {
        collapse_language_variants(&sorted, &config.postprocess.default_languages, &patterns)
    } else {
        sorted
    };
    result.sort();
    result
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
