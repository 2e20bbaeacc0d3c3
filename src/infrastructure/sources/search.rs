use super::SourceAdapter;
use crate::domain::ScorePair;
use crate::infrastructure::ScoreSite;
use async_trait::async_trait;
use std::sync::Arc;

pub struct SearchSource {
    site: Arc<ScoreSite>,
}

impl SearchSource {
    pub fn new(site: Arc<ScoreSite>) -> Self {
        Self { site }
    }
}

#[async_trait]
impl SourceAdapter for SearchSource {
    fn name(&self) -> &'static str {
        "search"
    }

    async fn try_fetch(&self, raw_title: &str) -> Option<ScorePair> {
        self.site.search_and_fetch(raw_title).await
    }
}
