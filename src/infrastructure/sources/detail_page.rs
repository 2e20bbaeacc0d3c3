use super::SourceAdapter;
use crate::domain::ScorePair;
use crate::infrastructure::ScoreSite;
use crate::services::normalize::TitleNormalizer;
use async_trait::async_trait;
use std::sync::Arc;

pub struct DetailPageSource {
    site: Arc<ScoreSite>,
}

impl DetailPageSource {
    pub fn new(site: Arc<ScoreSite>) -> Self {
        Self { site }
    }
}

#[async_trait]
impl SourceAdapter for DetailPageSource {
    fn name(&self) -> &'static str {
        "detail-page"
    }

    async fn try_fetch(&self, raw_title: &str) -> Option<ScorePair> {
        let slug = TitleNormalizer::slugify(raw_title);
        if slug.is_empty() {
            return None;
        }
        self.site.fetch_detail_page(&slug).await
    }
}
