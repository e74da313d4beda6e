//! Sitemap discovery engine (C8): robots.txt → common-path probe → recursive
//! expansion via C7.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use discovery_core::SitemapConfig;
use futures::future::join_all;
use regex::Regex;
use tracing::{info, warn};
use url::Url;

use crate::compression::maybe_decompress;
use crate::http_client::build_client;
use crate::queue::{process_with_queue, BoxFuture};
use crate::sitemap::{get_nested_sitemaps, looks_like_sitemap, parse_sitemap_urls};

/// Discover every URL reachable from a target's sitemap tree.
///
/// Never raises to the caller: every transport or parse failure is logged
/// and treated as "no URLs from this source," per §7.
pub async fn discover_sitemap_urls(base_url: &str, config: &SitemapConfig) -> Vec<String> {
    let client = match build_client(&config.headers, config.timeout, config.concurrency) {
        Ok(client) => client,
        Err(e) => {
            warn!("failed to build sitemap HTTP client: {e}");
            return Vec::new();
        }
    };

    let sitemap_urls = find_candidate_sitemap_urls(&client, base_url, config).await;
    if sitemap_urls.is_empty() {
        warn!("no sitemap URLs found for {base_url}");
        return Vec::new();
    }

    let client = Arc::new(client);
    let max_per_sitemap = config.max_urls_per_sitemap;

    let process_client = Arc::clone(&client);
    let process_item = move |sitemap_url: String| -> BoxFuture<'static, Vec<String>> {
        let client = Arc::clone(&process_client);
        Box::pin(async move { collect_urls_from_sitemap(&client, &sitemap_url, max_per_sitemap).await })
    };

    let next_client = Arc::clone(&client);
    let get_next_items = move |sitemap_url: String| -> BoxFuture<'static, Vec<String>> {
        let client = Arc::clone(&next_client);
        Box::pin(async move { fetch_nested_sitemaps(&client, &sitemap_url).await })
    };

    let worker_timeout = Duration::from_secs_f64(config.worker_timeout);
    let mut all_urls: HashSet<String> =
        process_with_queue(sitemap_urls, config.concurrency, worker_timeout, process_item, get_next_items)
            .await;

    if all_urls.len() > config.max_total_urls {
        warn!(
            "total URLs ({}) exceeds limit ({}), truncating",
            all_urls.len(),
            config.max_total_urls
        );
        let mut sorted: Vec<String> = all_urls.into_iter().collect();
        sorted.sort();
        sorted.truncate(config.max_total_urls);
        all_urls = sorted.into_iter().collect();
    }

    info!("total discovered URLs: {}", all_urls.len());
    let mut result: Vec<String> = all_urls.into_iter().collect();
    result.sort();
    result
}

async fn find_candidate_sitemap_urls(
    client: &reqwest::Client,
    base_url: &str,
    config: &SitemapConfig,
) -> Vec<String> {
    for attempt in 0..config.retry {
        match sitemap_urls_from_robots(client, base_url).await {
            Ok(urls) if !urls.is_empty() => return urls,
            Ok(_) => {}
            Err(e) => warn!("attempt {}: {e}", attempt + 1),
        }
    }

    try_common_sitemap_urls(client, base_url, config).await
}

static SITEMAP_LINE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();

fn sitemap_line_pattern() -> &'static Regex {
    SITEMAP_LINE.get_or_init(|| Regex::new(r"(?i)^\s*sitemap:\s*(.+)$").expect("valid pattern"))
}

async fn sitemap_urls_from_robots(client: &reqwest::Client, base_url: &str) -> Result<Vec<String>, String> {
    let robots_url = join_path(base_url, "/robots.txt");

    let response = client
        .get(&robots_url)
        .send()
        .await
        .map_err(|e| format!("failed to fetch robots.txt: {e}"))?;

    let final_url = response.url().to_string();
    let effective_base = if final_url != robots_url {
        match Url::parse(&final_url) {
            Ok(u) => format!("{}://{}", u.scheme(), u.host_str().unwrap_or_default()),
            Err(_) => base_url.to_string(),
        }
    } else {
        base_url.to_string()
    };

    let body = response
        .bytes()
        .await
        .map_err(|e| format!("failed to read robots.txt body: {e}"))?;
    let decompressed = maybe_decompress(&final_url, &body)
        .map_err(|e| format!("decompression or decoding failed: {e}"))?;
    let text = String::from_utf8_lossy(&decompressed);

    Ok(extract_sitemap_urls(&text, &effective_base))
}

fn extract_sitemap_urls(robots_txt: &str, base_url: &str) -> Vec<String> {
    let pattern = sitemap_line_pattern();
    robots_txt
        .lines()
        .filter_map(|line| pattern.captures(line.trim()))
        .map(|cap| {
            let sitemap_url = cap[1].trim().to_string();
            if sitemap_url.starts_with("http://") || sitemap_url.starts_with("https://") {
                sitemap_url
            } else {
                join_path(base_url, &sitemap_url)
            }
        })
        .collect()
}

async fn try_common_sitemap_urls(
    client: &reqwest::Client,
    base_url: &str,
    config: &SitemapConfig,
) -> Vec<String> {
    let checks = config.common_paths.iter().map(|path| {
        let url = join_path(base_url, path);
        check_common_sitemap_url(client, url)
    });

    join_all(checks)
        .await
        .into_iter()
        .flatten()
        .collect()
}

async fn check_common_sitemap_url(client: &reqwest::Client, url: String) -> Option<String> {
    info!("trying common sitemap path: {url}");
    let response = match client.get(&url).send().await {
        Ok(r) => r,
        Err(e) => {
            warn!("failed to check common sitemap {url}: {e}");
            return None;
        }
    };
    let body = response.bytes().await.ok()?;
    let content = maybe_decompress(&url, &body).ok()?;
    let text = String::from_utf8_lossy(&content);
    looks_like_sitemap(&text).then_some(url)
}

async fn collect_urls_from_sitemap(
    client: &reqwest::Client,
    sitemap_url: &str,
    max_urls_per_sitemap: usize,
) -> Vec<String> {
    info!("collecting URLs from sitemap: {sitemap_url}");
    let response = match client.get(sitemap_url).send().await {
        Ok(r) => r,
        Err(e) => {
            warn!("failed to collect URLs from {sitemap_url}: {e}");
            return Vec::new();
        }
    };
    let body = match response.bytes().await {
        Ok(b) => b,
        Err(e) => {
            warn!("failed to read sitemap body {sitemap_url}: {e}");
            return Vec::new();
        }
    };
    let content = match maybe_decompress(sitemap_url, &body) {
        Ok(c) => c,
        Err(e) => {
            warn!("failed to collect URLs from {sitemap_url}: {e}");
            return Vec::new();
        }
    };
    let text = String::from_utf8_lossy(&content);

    let mut seen = HashSet::new();
    let mut urls: Vec<String> = parse_sitemap_urls(&text)
        .into_iter()
        .filter(|u| seen.insert(u.clone()))
        .collect();
    if urls.len() > max_urls_per_sitemap {
        warn!(
            "sitemap {sitemap_url} has {} URLs, limiting to {max_urls_per_sitemap}",
            urls.len()
        );
        urls.truncate(max_urls_per_sitemap);
    }
    urls
}

async fn fetch_nested_sitemaps(client: &reqwest::Client, sitemap_url: &str) -> Vec<String> {
    let Ok(response) = client.get(sitemap_url).send().await else {
        return Vec::new();
    };
    let Ok(body) = response.bytes().await else {
        return Vec::new();
    };
    let Ok(content) = maybe_decompress(sitemap_url, &body) else {
        return Vec::new();
    };
    let text = String::from_utf8_lossy(&content);
    get_nested_sitemaps(&text)
}

fn join_path(base_url: &str, path: &str) -> String {
    Url::parse(base_url)
        .and_then(|u| u.join(path))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| format!("{base_url}{path}"))
}

#[cfg(test)]
#[path = "sitemap_discovery_test.rs"]
mod tests;
