//! Shared HTTP client construction.
//!
//! One client instance per discovery call, reused across requests, matching
//! §5's transport contract: HTTP/2, redirect following, and pool sizing
//! proportional to `concurrency`.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::DiscoveryError;

pub fn build_client(
    headers: &HashMap<String, String>,
    timeout_secs: u64,
    concurrency: usize,
) -> Result<reqwest::Client, DiscoveryError> {
    let mut header_map = HeaderMap::new();
    for (k, v) in headers {
        let Ok(name) = HeaderName::from_bytes(k.as_bytes()) else {
            continue;
        };
        let Ok(value) = HeaderValue::from_str(v) else {
            continue;
        };
        header_map.insert(name, value);
    }

    reqwest::Client::builder()
        .default_headers(header_map)
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(10))
        .pool_max_idle_per_host(concurrency.max(1) * 2)
        .build()
        .map_err(|e| DiscoveryError::Request {
            url: "<client construction>".to_string(),
            source: e,
        })
}
