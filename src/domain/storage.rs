use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub struct StorageKeys;

impl StorageKeys {
    pub const SCORE_PREFIX: &'static str = "mcscore:";

    pub fn score_key(normalized_title: &str) -> String {
        format!("{}{}", Self::SCORE_PREFIX, normalized_title)
    }
}
