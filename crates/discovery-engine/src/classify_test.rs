use discovery_core::ParsingConfig;

use super::*;
use crate::patterns::ParsingPatterns;

fn patterns() -> ParsingPatterns {
    let cfg = ParsingConfig {
        html_content_types: vec!["text/html".to_string()],
        sitemap_content_types: vec!["application/xml".to_string()],
        url_in_text_pattern: r#"(?P<u>https?://\S+)"#.to_string(),
        asset_extensions: vec!["png".to_string(), "css".to_string()],
        non_html_api_patterns: vec!["/api/".to_string(), ".json".to_string()],
        tracking_params: vec![],
        language_segment_pattern: r"^/([a-z]{2})/".to_string(),
        pagination_hints: vec![],
        max_url_length: 2048,
        prefer_https: false,
        strip_www: false,
        max_pagination_page: 500,
    };
    ParsingPatterns::from_config(&cfg).unwrap()
}

#[test]
fn empty_url_is_not_html() {
    assert!(!is_probably_html_url("", &patterns()));
}

#[test]
fn api_path_is_not_html() {
    assert!(!is_probably_html_url("https://a.com/api/v1/things", &patterns()));
}

#[test]
fn asset_extension_suffix_is_not_html() {
    assert!(!is_probably_html_url("https://a.com/logo.PNG", &patterns()));
}

#[test]
fn asset_extension_followed_by_query_is_not_html() {
    assert!(!is_probably_html_url("https://a.com/logo.png?v=2", &patterns()));
}

#[test]
fn plain_page_is_html() {
    assert!(is_probably_html_url("https://a.com/about", &patterns()));
}
