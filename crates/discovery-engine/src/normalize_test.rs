use discovery_core::ParsingConfig;

use super::*;
use crate::patterns::ParsingPatterns;

fn patterns_with(asset_extensions: &[&str], pagination_hints: &[&str]) -> ParsingPatterns {
    let cfg = ParsingConfig {
        html_content_types: vec!["text/html".to_string()],
        sitemap_content_types: vec!["application/xml".to_string()],
        url_in_text_pattern: r#"(?P<u>https?://\S+)"#.to_string(),
        asset_extensions: asset_extensions.iter().map(|s| (*s).to_string()).collect(),
        non_html_api_patterns: vec!["/api/".to_string()],
        tracking_params: vec![],
        language_segment_pattern: r"^/([a-z]{2}(?:-[A-Z]{2})?)/".to_string(),
        pagination_hints: pagination_hints.iter().map(|s| (*s).to_string()).collect(),
        max_url_length: 2048,
        prefer_https: true,
        strip_www: true,
        max_pagination_page: 500,
    };
    ParsingPatterns::from_config(&cfg).unwrap()
}

#[test]
fn strips_www_and_drops_pagination_and_asset_keys() {
    let patterns = patterns_with(&["utm_source"], &["page"]);
    let out = normalize_link(
        "https://a.com/",
        "https://www.a.com/x//y/?utm_source=x&page=2&id=7#frag",
        &patterns,
    );
    assert_eq!(out.as_deref(), Some("https://a.com/x/y/?id=7"));
}

#[test]
fn rejects_non_http_schemes() {
    let patterns = patterns_with(&[], &[]);
    assert_eq!(normalize_link("https://a.com/", "javascript:void(0)", &patterns), None);
    assert_eq!(normalize_link("https://a.com/", "mailto:x@y.com", &patterns), None);
    assert_eq!(normalize_link("https://a.com/", "#top", &patterns), None);
}

#[test]
fn resolves_relative_paths_against_base() {
    let patterns = patterns_with(&[], &[]);
    let out = normalize_link("https://a.com/dir/page", "../other", &patterns);
    assert_eq!(out.as_deref(), Some("https://a.com/other"));
}

#[test]
fn protocol_relative_href_adopts_base_scheme_preference() {
    let patterns = patterns_with(&[], &[]);
    let out = normalize_link("http://a.com/", "//cdn.a.com/x", &patterns);
    assert_eq!(out.as_deref(), Some("https://cdn.a.com/x"));
}

#[test]
fn is_idempotent() {
    let patterns = patterns_with(&["utm_source"], &["page"]);
    let once = normalize_link(
        "https://a.com/",
        "https://www.a.com/x//y/?utm_source=x&page=2&id=7#frag",
        &patterns,
    )
    .unwrap();
    let twice = normalize_link(&once.clone(), &once, &patterns).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn rejects_urls_over_max_length() {
    let cfg = ParsingConfig {
        html_content_types: vec!["text/html".to_string()],
        sitemap_content_types: vec!["application/xml".to_string()],
        url_in_text_pattern: r#"(?P<u>https?://\S+)"#.to_string(),
        asset_extensions: vec![],
        non_html_api_patterns: vec![],
        tracking_params: vec![],
        language_segment_pattern: r"^/([a-z]{2})/".to_string(),
        pagination_hints: vec![],
        max_url_length: 20,
        prefer_https: false,
        strip_www: false,
        max_pagination_page: 500,
    };
    let patterns = ParsingPatterns::from_config(&cfg).unwrap();
    assert_eq!(
        normalize_link("https://a.com/", "/a-very-long-path-indeed", &patterns),
        None
    );
}

#[test]
fn same_domain_accepts_www_when_root_is_bare() {
    assert!(same_domain("https://www.a.com/x", "a.com", false));
    assert!(!same_domain("https://evil.com/x", "a.com", false));
}

#[test]
fn same_domain_subdomain_requires_flag() {
    assert!(!same_domain("https://sub.a.com/x", "a.com", false));
    assert!(same_domain("https://sub.a.com/x", "a.com", true));
}
