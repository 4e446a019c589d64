//! HTML extraction for the catalog page and product detail pages.
//!
//! Pure functions over already-fetched markup, so they run inside
//! `spawn_blocking` (scraper's `Html` is `!Send`) and are testable offline.

use std::collections::HashSet;

use reqwest::Url;

use crate::{AudioCandidate, CatalogEntry};

/// Extract product name/detail-link pairs from the catalog listing.
///
/// Each `.mt-show-more-listing` block contributes its first anchor. The
/// anchor's `title` is the display name; link text and then the href are used
/// when it is missing.
pub fn parse_catalog(html: &str, base: &Url) -> Vec<CatalogEntry> {
    let document = scraper::Html::parse_document(html);
    let listing_sel = scraper::Selector::parse(".mt-show-more-listing").unwrap();
    let link_sel = scraper::Selector::parse("a").unwrap();

    let mut entries = Vec::new();
    for listing in document.select(&listing_sel) {
        let Some(link) = listing.select(&link_sel).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() {
            continue;
        }
        let Some(detail_url) = resolve(base, href) else {
            continue;
        };

        let name = link
            .value()
            .attr("title")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .or_else(|| {
                let text = link.text().collect::<String>();
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            })
            .unwrap_or_else(|| href.to_string());

        entries.push(CatalogEntry::new(name, detail_url));
    }
    entries
}

/// Collect every hyperlink whose target contains `marker` (e.g. `.gme`).
///
/// Document order is kept; repeated links to the same file appear once.
pub fn parse_audio_links(html: &str, base: &Url, marker: &str) -> Vec<AudioCandidate> {
    let document = scraper::Html::parse_document(html);
    let selector = scraper::Selector::parse("a[href]").unwrap();

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for element in document.select(&selector) {
        let href = element.value().attr("href").unwrap_or("").trim();
        if !href.contains(marker) {
            continue;
        }
        let Some(file_url) = resolve(base, href) else {
            continue;
        };
        if !seen.insert(file_url.clone()) {
            continue;
        }
        let name = file_name(&file_url).unwrap_or_else(|| href.to_string());
        candidates.push(AudioCandidate::new(name, file_url));
    }
    candidates
}

/// Resolve a possibly relative href against the page it was found on.
fn resolve(base: &Url, href: &str) -> Option<String> {
    base.join(href).ok().map(String::from)
}

/// Percent-decoded final path segment of `url`, if it has a non-empty one.
pub fn file_name(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.next_back()?;
    if segment.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    Some(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://service.example.test/tiptoi/Audiodateien").unwrap()
    }

    #[test]
    fn catalog_takes_first_anchor_of_each_listing() {
        let html = r#"
            <ul>
              <li class="mt-show-more-listing">
                <a href="https://service.example.test/p/bauernhof" title="Bauernhof">x</a>
                <a href="/ignored">second</a>
              </li>
              <li class="mt-show-more-listing">
                <a href="/p/dinos" title="Dinosaurier">y</a>
              </li>
              <li class="other"><a href="/p/nope" title="Nope">z</a></li>
            </ul>"#;

        let entries = parse_catalog(html, &base());
        assert_eq!(
            entries,
            vec![
                CatalogEntry::new("Bauernhof", "https://service.example.test/p/bauernhof"),
                CatalogEntry::new("Dinosaurier", "https://service.example.test/p/dinos"),
            ]
        );
    }

    #[test]
    fn catalog_name_falls_back_to_link_text() {
        let html = r#"<div class="mt-show-more-listing"><a href="/p/1"> Ritter </a></div>"#;
        let entries = parse_catalog(html, &base());
        assert_eq!(entries[0].name, "Ritter");
    }

    #[test]
    fn catalog_skips_listings_without_href() {
        let html = r#"
            <div class="mt-show-more-listing"><a title="No link">a</a></div>
            <div class="mt-show-more-listing"><span>no anchor</span></div>"#;
        assert!(parse_catalog(html, &base()).is_empty());
    }

    #[test]
    fn catalog_page_without_listings_is_empty_not_error() {
        assert!(parse_catalog("<html><body></body></html>", &base()).is_empty());
    }

    #[test]
    fn audio_links_keep_order_and_filter_by_marker() {
        let html = r#"
            <a href="https://cdn.example.test/files/Bauernhof.gme">Download</a>
            <a href="/manual.pdf">Manual</a>
            <a href="/files/Bauernhof%20Teil%202.gme">Teil 2</a>
            <a name="anchor-without-href">x</a>"#;

        let links = parse_audio_links(html, &base(), ".gme");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].name, "Bauernhof.gme");
        assert_eq!(links[0].file_url, "https://cdn.example.test/files/Bauernhof.gme");
        assert_eq!(links[1].name, "Bauernhof Teil 2.gme");
        assert_eq!(
            links[1].file_url,
            "https://service.example.test/files/Bauernhof%20Teil%202.gme"
        );
    }

    #[test]
    fn audio_links_are_deduplicated() {
        let html = r#"
            <a href="/f/a.gme">icon</a>
            <a href="/f/a.gme">text</a>"#;
        assert_eq!(parse_audio_links(html, &base(), ".gme").len(), 1);
    }

    #[test]
    fn audio_links_empty_when_nothing_matches() {
        let html = r#"<a href="/f/a.mp3">a</a>"#;
        assert!(parse_audio_links(html, &base(), ".gme").is_empty());
    }

    #[test]
    fn file_name_uses_last_segment() {
        assert_eq!(
            file_name("https://x.test/a/b/Weltatlas.gme").as_deref(),
            Some("Weltatlas.gme")
        );
        assert_eq!(file_name("https://x.test/a/b/"), None);
        assert_eq!(file_name("not a url"), None);
    }
}
