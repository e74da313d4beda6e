use discovery_core::ParsingConfig;

use super::*;

#[test]
fn normalize_base_url_adds_scheme_and_strips_trailing_slash() {
    assert_eq!(normalize_base_url("example.com"), "https://example.com");
    assert_eq!(normalize_base_url("https://example.com/"), "https://example.com");
    assert_eq!(normalize_base_url("http://example.com"), "http://example.com");
}

#[test]
fn compile_patterns_wraps_config_error() {
    let cfg = ParsingConfig {
        html_content_types: vec!["text/html".to_string()],
        sitemap_content_types: vec!["application/xml".to_string()],
        url_in_text_pattern: r#"(?P<u>https?://\S+)"#.to_string(),
        asset_extensions: vec![],
        non_html_api_patterns: vec![],
        tracking_params: vec![],
        language_segment_pattern: "(unterminated".to_string(),
        pagination_hints: vec![],
        max_url_length: 2048,
        prefer_https: false,
        strip_www: false,
        max_pagination_page: 500,
    };
    let err = compile_patterns(&cfg).unwrap_err();
    assert!(matches!(err, DiscoveryError::Config(_)));
}
