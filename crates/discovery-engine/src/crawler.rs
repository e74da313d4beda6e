//! Priority-frontier BFS HTTP crawler (C9).
//!
//! The frontier is a [`BinaryHeap`] of `Reverse<(priority, insertion_seq,
//! url)>` guarded by a [`tokio::sync::Mutex`], giving FIFO tie-breaking
//! within equal priority.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use discovery_core::CrawlerConfig;
use tokio::sync::{Mutex, Semaphore};
use tracing::{info, warn};
use url::Url;

use crate::classify::is_probably_html_url;
use crate::html::extract_links;
use crate::normalize::{canonical_netloc, normalize_link, same_domain};
use crate::patterns::ParsingPatterns;

const QUEUE_IDLE_TIMEOUT: Duration = Duration::from_secs(10);
const POLL_INTERVAL: Duration = Duration::from_millis(200);

struct Shared {
    frontier: Mutex<BinaryHeap<Reverse<(i64, u64, String)>>>,
    seen: Mutex<HashSet<String>>,
    found: Mutex<HashSet<String>>,
    sequence: AtomicU64,
    client: reqwest::Client,
    root_netloc: String,
    cfg: CrawlerConfig,
    patterns: ParsingPatterns,
}

/// Crawl the HTML graph reachable from `start_url`, staying in domain scope.
///
/// Returns a sorted list of canonical URLs. Never raises: fetch, parse, and
/// extraction failures are logged and the worker moves on.
pub async fn run(start_url: &str, cfg: CrawlerConfig, patterns: ParsingPatterns) -> Vec<String> {
    let start_url = normalize_link(start_url, start_url, &patterns)
        .unwrap_or_else(|| start_url.trim_end_matches('/').to_string());

    let root_netloc = match Url::parse(&start_url) {
        Ok(u) => {
            let host = u.host_str().unwrap_or_default().to_lowercase();
            let (_, netloc) = canonical_netloc(u.scheme(), &host, u.port(), &patterns);
            netloc
        }
        Err(_) => {
            warn!("crawler could not parse start URL {start_url}");
            return Vec::new();
        }
    };

    let client = match crate::http_client::build_client(&std::collections::HashMap::new(), 15, cfg.concurrency) {
        Ok(c) => c,
        Err(e) => {
            warn!("failed to build crawler HTTP client: {e}");
            return Vec::new();
        }
    };

    info!("crawler initialized: start_url={start_url}, root_netloc={root_netloc}");

    let shared = Arc::new(Shared {
        frontier: Mutex::new(BinaryHeap::new()),
        seen: Mutex::new(HashSet::new()),
        found: Mutex::new(HashSet::new()),
        sequence: AtomicU64::new(0),
        client,
        root_netloc,
        cfg: cfg.clone(),
        patterns,
    });

    prepare(&shared, &start_url).await;

    info!(
        "starting crawler with {} workers, max_pages: {}",
        cfg.concurrency, cfg.max_pages
    );
    let semaphore = Arc::new(Semaphore::new(cfg.concurrency.max(1)));
    let mut handles = Vec::with_capacity(cfg.concurrency.max(1));
    for _ in 0..cfg.concurrency.max(1) {
        let shared = Arc::clone(&shared);
        let semaphore = Arc::clone(&semaphore);
        handles.push(tokio::spawn(async move { worker(shared, semaphore).await }));
    }

    for handle in handles {
        let _ = handle.await;
    }

    let seen = shared.seen.lock().await;
    let found = shared.found.lock().await;
    info!("crawler finished. seen: {}, found: {}", seen.len(), found.len());

    let mut result: Vec<String> = found.iter().cloned().collect();
    result.sort();
    result
}

async fn prepare(shared: &Shared, start_url: &str) {
    push(shared, start_url).await;
    if !shared.cfg.html_only || is_probably_html_url(start_url, &shared.patterns) {
        shared.found.lock().await.insert(start_url.to_string());
    }
}

async fn push(shared: &Shared, url: &str) {
    let prio = priority_for(url, &shared.patterns);
    let seq = shared.sequence.fetch_add(1, Ordering::SeqCst);
    shared
        .frontier
        .lock()
        .await
        .push(Reverse((prio, seq, url.to_string())));
}

fn priority_for(url: &str, patterns: &ParsingPatterns) -> i64 {
    let Ok(parsed) = Url::parse(url) else {
        return 10;
    };
    let path = parsed.path();
    let path = if path.is_empty() { "/" } else { path };
    let mut score = if path == "/" { 5 } else { 10 + (path.matches('/').count() as i64 * 5).min(50) };

    let has_pagination_key = parsed
        .query_pairs()
        .any(|(k, _)| patterns.pagination_hints.contains(&k.to_lowercase()));
    if has_pagination_key {
        score += 20;
    }
    score
}

fn allowed(shared: &Shared, url: &str) -> bool {
    same_domain(url, &shared.root_netloc, shared.cfg.include_subdomains)
}

async fn fetch_html(shared: &Shared, url: &str) -> Option<String> {
    if shared.cfg.verbose {
        info!("GET {url}");
    }
    let response = match shared.client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            if shared.cfg.verbose {
                warn!("HTTP error at {url}: {e}");
            }
            return None;
        }
    };
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if shared.cfg.verbose {
        info!("{} {url} [{content_type}]", response.status());
    }
    if !shared.patterns.html_ct.is_match(&content_type) {
        return None;
    }
    response.text().await.ok()
}

async fn worker(shared: Arc<Shared>, semaphore: Arc<Semaphore>) {
    loop {
        if shared.seen.lock().await.len() >= shared.cfg.max_pages {
            return;
        }

        let url = match dequeue_with_idle_timeout(&shared).await {
            Some(url) => url,
            None => return,
        };

        if shared.seen.lock().await.contains(&url) {
            continue;
        }
        if !allowed(&shared, &url) {
            continue;
        }
        if !is_probably_html_url(&url, &shared.patterns) {
            continue;
        }

        let Ok(_permit) = semaphore.acquire().await else {
            return;
        };
        shared.seen.lock().await.insert(url.clone());

        let Some(html) = fetch_html(&shared, &url).await else {
            continue;
        };

        let links = extract_links(&url, &html, shared.cfg.include_assets, shared.cfg.html_only, &shared.patterns);
        info!("found {} links on {url}", links.len());

        let mut new_links_added = 0u32;
        let mut rejected_domain = 0u32;
        let mut rejected_html = 0u32;
        let mut already_seen = 0u32;

        for link in links {
            if link.is_empty() || link.len() > shared.patterns.max_url_length {
                continue;
            }
            if !allowed(&shared, &link) {
                rejected_domain += 1;
                continue;
            }

            let html_like = is_probably_html_url(&link, &shared.patterns);
            if !shared.cfg.html_only || html_like {
                shared.found.lock().await.insert(link.clone());
            }

            let already = shared.seen.lock().await.contains(&link);
            if !already && html_like {
                push(&shared, &link).await;
                new_links_added += 1;
            } else if already {
                already_seen += 1;
            } else {
                rejected_html += 1;
            }
        }

        info!(
            "link processing: {new_links_added} added, {rejected_domain} rejected (domain), {rejected_html} rejected (html), {already_seen} already seen"
        );
    }
}

async fn dequeue_with_idle_timeout(shared: &Shared) -> Option<String> {
    let mut waited = Duration::ZERO;
    loop {
        if let Some(Reverse((_, _, url))) = shared.frontier.lock().await.pop() {
            return Some(url);
        }
        if waited >= QUEUE_IDLE_TIMEOUT {
            if shared.frontier.lock().await.is_empty() {
                info!("worker exiting: queue empty for 10 seconds");
                return None;
            }
            waited = Duration::ZERO;
            continue;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
        waited += POLL_INTERVAL;
    }
}

#[cfg(test)]
#[path = "crawler_test.rs"]
mod tests;
