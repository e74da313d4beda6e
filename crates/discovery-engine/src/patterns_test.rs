use super::*;

fn sample_config() -> ParsingConfig {
    ParsingConfig {
        html_content_types: vec!["text/html".to_string()],
        sitemap_content_types: vec!["application/xml".to_string(), "text/xml".to_string()],
        url_in_text_pattern: r#"(?P<u>https?://[^"'\s]+)"#.to_string(),
        asset_extensions: vec!["PNG".to_string(), ".JPG".to_string()],
        non_html_api_patterns: vec!["/api/".to_string()],
        tracking_params: vec!["utm_source".to_string()],
        language_segment_pattern: r"^/([a-z]{2}(?:-[A-Z]{2})?)/".to_string(),
        pagination_hints: vec!["Page".to_string()],
        max_url_length: 2048,
        prefer_https: true,
        strip_www: true,
        max_pagination_page: 500,
    }
}

#[test]
fn lowercases_and_strips_dot_from_asset_extensions() {
    let patterns = ParsingPatterns::from_config(&sample_config()).unwrap();
    assert!(patterns.asset_extensions.contains("png"));
    assert!(patterns.asset_extensions.contains("jpg"));
}

#[test]
fn lowercases_pagination_hints() {
    let patterns = ParsingPatterns::from_config(&sample_config()).unwrap();
    assert!(patterns.pagination_hints.contains("page"));
}

#[test]
fn content_type_regex_is_case_insensitive() {
    let patterns = ParsingPatterns::from_config(&sample_config()).unwrap();
    assert!(patterns.html_ct.is_match("TEXT/HTML; charset=utf-8"));
}

#[test]
fn invalid_regex_is_a_config_error() {
    let mut cfg = sample_config();
    cfg.language_segment_pattern = "(unterminated".to_string();
    let err = ParsingPatterns::from_config(&cfg).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}
