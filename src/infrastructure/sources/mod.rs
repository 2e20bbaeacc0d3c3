use crate::domain::ScorePair;
use async_trait::async_trait;

pub(crate) mod detail_page;
pub(crate) mod search;

#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    async fn try_fetch(&self, raw_title: &str) -> Option<ScorePair>;
}
