//! Frozen configuration loaded from a single YAML document.
//!
//! Mirrors [`serde_yaml`]-based loading of `config/brands.yaml` in the
//! teacher's core crate: read the file, parse it, validate it, hand back an
//! owned value. Nothing downstream of [`load_config`] touches the
//! filesystem or the environment.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct SitemapConfig {
    pub timeout: u64,
    pub retry: u32,
    pub concurrency: usize,
    pub common_paths: Vec<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default = "default_max_urls_per_sitemap")]
    pub max_urls_per_sitemap: usize,
    #[serde(default = "default_max_total_urls")]
    pub max_total_urls: usize,
    #[serde(default = "default_worker_timeout")]
    pub worker_timeout: f64,
}

fn default_max_urls_per_sitemap() -> usize {
    50_000
}

fn default_max_total_urls() -> usize {
    1_000_000
}

fn default_worker_timeout() -> f64 {
    30.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    pub include_subdomains: bool,
    pub include_assets: bool,
    pub html_only: bool,
    pub max_pages: usize,
    pub concurrency: usize,
    /// Parsed and carried through but never consulted for `Disallow`
    /// enforcement; see DESIGN.md.
    pub obey_robots: bool,
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostprocessConfig {
    pub collapse_language_variants: bool,
    #[serde(default)]
    pub default_languages: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsingConfig {
    pub html_content_types: Vec<String>,
    pub sitemap_content_types: Vec<String>,
    pub url_in_text_pattern: String,
    pub asset_extensions: Vec<String>,
    pub non_html_api_patterns: Vec<String>,
    #[serde(default)]
    pub tracking_params: Vec<String>,
    pub language_segment_pattern: String,
    pub pagination_hints: Vec<String>,
    pub max_url_length: usize,
    #[serde(default)]
    pub prefer_https: bool,
    #[serde(default)]
    pub strip_www: bool,
    #[serde(default = "default_max_pagination_page")]
    pub max_pagination_page: u32,
}

fn default_max_pagination_page() -> u32 {
    500
}

/// Top-level configuration document.
///
/// `target` mirrors the original's `test.target_url`: the default start
/// URL the CLI falls back to when no positional argument is given.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub target: Option<String>,
    pub sitemap: SitemapConfig,
    pub crawler: CrawlerConfig,
    pub postprocess: PostprocessConfig,
    pub parsing: ParsingConfig,
}

/// Load and validate configuration from a YAML file.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, parsed, or fails
/// validation.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: Config = serde_yaml::from_str(&content).map_err(ConfigError::ConfigFileParse)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.sitemap.concurrency < 1 {
        return Err(ConfigError::Validation(
            "sitemap.concurrency must be >= 1".to_string(),
        ));
    }
    if config.crawler.concurrency < 1 {
        return Err(ConfigError::Validation(
            "crawler.concurrency must be >= 1".to_string(),
        ));
    }
    if config.crawler.max_pages < 1 {
        return Err(ConfigError::Validation(
            "crawler.max_pages must be >= 1".to_string(),
        ));
    }
    if config.sitemap.worker_timeout <= 0.0 {
        return Err(ConfigError::Validation(
            "sitemap.worker_timeout must be > 0".to_string(),
        ));
    }
    if config.parsing.max_url_length == 0 {
        return Err(ConfigError::Validation(
            "parsing.max_url_length must be > 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
