//! Compiled regex/set bundle derived from [`discovery_core::ParsingConfig`].
//!
//! Built once per discovery call and shared by reference across C2–C10, the
//! same way `scbdb_scraper::ShopifyClient::new` builds a [`reqwest::Client`]
//! once and reuses it for the lifetime of a scrape.

use std::collections::HashSet;

use discovery_core::{ConfigError, ParsingConfig};
use regex::Regex;

/// Immutable bundle of compiled patterns and derived sets.
///
/// Every field is read-only after construction; consumers receive this by
/// shared reference and must not attempt to mutate it.
#[derive(Debug, Clone)]
pub struct ParsingPatterns {
    pub html_ct: Regex,
    pub sitemap_ct: Regex,
    pub url_in_text: Regex,
    pub asset_extensions: HashSet<String>,
    pub non_html_api: Regex,
    pub language_segment: Regex,
    pub pagination_hints: HashSet<String>,
    pub max_url_length: usize,
    pub prefer_https: bool,
    pub strip_www: bool,
    pub max_pagination_page: u32,
}

impl ParsingPatterns {
    /// Compile all patterns from a frozen [`ParsingConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any regex fails to compile.
    /// This is treated as a startup-time configuration error, never a
    /// discovery-time one.
    pub fn from_config(cfg: &ParsingConfig) -> Result<Self, ConfigError> {
        let html_ct = compile_alternation(&cfg.html_content_types, "parsing.html_content_types")?;
        let sitemap_ct = compile_alternation(
            &cfg.sitemap_content_types,
            "parsing.sitemap_content_types",
        )?;
        let url_in_text = compile_raw(&cfg.url_in_text_pattern, "parsing.url_in_text_pattern")?;
        let non_html_api =
            compile_alternation(&cfg.non_html_api_patterns, "parsing.non_html_api_patterns")?;
        let language_segment = compile_raw(
            &cfg.language_segment_pattern,
            "parsing.language_segment_pattern",
        )?;

        let asset_extensions = cfg
            .asset_extensions
            .iter()
            .map(|e| e.to_lowercase().trim_start_matches('.').to_string())
            .collect();
        let pagination_hints = cfg.pagination_hints.iter().map(|p| p.to_lowercase()).collect();

        Ok(Self {
            html_ct,
            sitemap_ct,
            url_in_text,
            asset_extensions,
            non_html_api,
            language_segment,
            pagination_hints,
            max_url_length: cfg.max_url_length,
            prefer_https: cfg.prefer_https,
            strip_www: cfg.strip_www,
            max_pagination_page: cfg.max_pagination_page,
        })
    }
}

fn compile_alternation(parts: &[String], field: &str) -> Result<Regex, ConfigError> {
    let joined = parts.iter().map(|p| regex::escape(p)).collect::<Vec<_>>().join("|");
    Regex::new(&format!("(?i)({joined})"))
        .map_err(|e| ConfigError::Validation(format!("{field}: invalid pattern: {e}")))
}

fn compile_raw(pattern: &str, field: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!("(?i){pattern}"))
        .map_err(|e| ConfigError::Validation(format!("{field}: invalid pattern: {e}")))
}

#[cfg(test)]
#[path = "patterns_test.rs"]
mod tests;
