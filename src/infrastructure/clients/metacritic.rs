use crate::config::SiteConfig;
use crate::domain::ScorePair;
use crate::infrastructure::Fetcher;
use crate::services::normalize::TitleNormalizer;
use crate::services::parsing::ScoreParser;
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::{debug, info, warn};

static DETAIL_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:https?://[^/]+)?/movie/([a-z0-9][a-z0-9-]*)").unwrap());

// Proxied listings come back as markdown or plain text, so links are found
// by position instead of by anchor. `/search/movie/...` must not match.
static DETAIL_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[\s(\["'](?:https?://[^/\s)"']+)?/movie/([a-z0-9][a-z0-9-]*)"#).unwrap()
});

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

pub struct ScoreSite {
    fetcher: Arc<dyn Fetcher>,
    site: SiteConfig,
}

impl ScoreSite {
    pub fn new(fetcher: Arc<dyn Fetcher>, site: SiteConfig) -> Self {
        Self { fetcher, site }
    }

    pub async fn fetch_detail_page(&self, slug: &str) -> Option<ScorePair> {
        if slug.is_empty() {
            return None;
        }

        for url in self.site.with_mirror(self.site.detail_url(slug)) {
            let document = match self.fetcher.fetch_text(&url).await {
                Ok(document) => document,
                Err(e) => {
                    warn!("Detail page {} failed: {}", url, e);
                    continue;
                }
            };

            let scores = ScoreParser::parse(&document);
            if scores.is_empty() {
                debug!("No scores found on {}", url);
                continue;
            }

            info!("Found scores for '{}' on {}", slug, url);
            return Some(scores);
        }

        None
    }

    pub async fn search_and_fetch(&self, title: &str) -> Option<ScorePair> {
        let normalized = TitleNormalizer::normalize(title);
        if normalized.is_empty() {
            return None;
        }

        let query = urlencoding::encode(&normalized);
        let mut tried_slugs = FxHashSet::default();

        for url in self
            .site
            .search_urls(&query)
            .into_iter()
            .flat_map(|url| self.site.with_mirror(url))
        {
            let listing = match self.fetcher.fetch_text(&url).await {
                Ok(listing) => listing,
                Err(e) => {
                    warn!("Search {} failed: {}", url, e);
                    continue;
                }
            };

            let Some(slug) = extract_detail_slug(&listing) else {
                debug!("No detail link in search results from {}", url);
                continue;
            };

            if !tried_slugs.insert(slug.clone()) {
                debug!("Slug '{}' already tried, skipping", slug);
                continue;
            }

            info!("Search for '{}' led to slug '{}'", normalized, slug);
            if let Some(scores) = self.fetch_detail_page(&slug).await {
                return Some(scores);
            }
        }

        None
    }
}

/// Slug of the first detail-page link in a search listing.
pub fn extract_detail_slug(listing: &str) -> Option<String> {
    let document = Html::parse_document(listing);
    let from_anchor = document.select(&ANCHOR).find_map(|anchor| {
        let href = anchor.value().attr("href")?;
        DETAIL_HREF
            .captures(href)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    });

    from_anchor.or_else(|| {
        DETAIL_TEXT
            .captures(listing)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}
