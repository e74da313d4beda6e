//! Streaming XML parsing of one sitemap document (C6).
//!
//! Grounded in `sources::rss::parse_rss_feed`'s `Reader::from_str` +
//! `Event::Start/Text/End` state machine: track the current tag name and
//! whether we're inside a `<loc>` element, the same way that code tracks
//! "inside `<item>`".

use quick_xml::events::Event;
use quick_xml::Reader;

/// Root element of a parsed sitemap document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SitemapRoot {
    UrlSet,
    SitemapIndex,
    Unrecognized,
}

fn detect_root_and_locs(xml: &str) -> (SitemapRoot, Vec<String>) {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut root = SitemapRoot::Unrecognized;
    let mut root_seen = false;
    let mut locs = Vec::new();
    let mut current_tag = String::new();
    let mut in_loc = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = local_name(e.name().as_ref());
                if !root_seen {
                    root_seen = true;
                    root = match name.as_str() {
                        "urlset" => SitemapRoot::UrlSet,
                        "sitemapindex" => SitemapRoot::SitemapIndex,
                        _ => SitemapRoot::Unrecognized,
                    };
                }
                in_loc = name == "loc";
                current_tag = name;
            }
            Ok(Event::Empty(e)) => {
                let name = local_name(e.name().as_ref());
                if !root_seen {
                    root_seen = true;
                    root = match name.as_str() {
                        "urlset" => SitemapRoot::UrlSet,
                        "sitemapindex" => SitemapRoot::SitemapIndex,
                        _ => SitemapRoot::Unrecognized,
                    };
                }
            }
            Ok(Event::Text(e)) => {
                if in_loc {
                    if let Ok(text) = e.unescape() {
                        let trimmed = text.trim();
                        if !trimmed.is_empty() {
                            locs.push(trimmed.to_string());
                        }
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if in_loc {
                    let text = String::from_utf8_lossy(e.as_ref());
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        locs.push(trimmed.to_string());
                    }
                }
            }
            Ok(Event::End(e)) => {
                let name = local_name(e.name().as_ref());
                if name == current_tag {
                    in_loc = false;
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => return (SitemapRoot::Unrecognized, Vec::new()),
            _ => {}
        }
    }

    (root, locs)
}

fn local_name(raw: &[u8]) -> String {
    let s = std::str::from_utf8(raw).unwrap_or("");
    s.rsplit(':').next().unwrap_or(s).to_string()
}

/// Parse a `<urlset>` document, trimming and stripping fragment/query/
/// trailing-slash from every `<loc>` text. Returns an empty list for any
/// non-`urlset` root or malformed XML, never an error.
#[must_use]
pub fn parse_sitemap_urls(xml: &str) -> Vec<String> {
    let (root, locs) = detect_root_and_locs(xml);
    if root != SitemapRoot::UrlSet {
        return Vec::new();
    }
    locs.iter().map(|u| strip_fragment_query_and_slash(u)).collect()
}

/// Parse a `<sitemapindex>` document's `<loc>` entries, trimmed only.
#[must_use]
pub fn get_nested_sitemaps(xml: &str) -> Vec<String> {
    let (root, locs) = detect_root_and_locs(xml);
    if root != SitemapRoot::SitemapIndex {
        return Vec::new();
    }
    locs
}

/// Whether `xml`'s root element is `<urlset>` or `<sitemapindex>`, used by
/// the common-path probe to validate a candidate sitemap URL without caring
/// which kind it is.
#[must_use]
pub fn looks_like_sitemap(xml: &str) -> bool {
    let (root, _) = detect_root_and_locs(xml);
    root != SitemapRoot::Unrecognized
}

fn strip_fragment_query_and_slash(raw: &str) -> String {
    let without_fragment = raw.split('#').next().unwrap_or(raw);
    let without_query = without_fragment.split('?').next().unwrap_or(without_fragment);
    without_query.trim_end_matches('/').to_string()
}

#[cfg(test)]
#[path = "sitemap_test.rs"]
mod tests;
