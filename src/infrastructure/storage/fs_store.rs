use crate::domain::CacheBackend;
use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

#[derive(Clone)]
pub struct FileSystemStore {
    cache_dir: PathBuf,
}

impl FileSystemStore {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    fn get_path_for_key(&self, key: &str) -> PathBuf {
        let filename: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.cache_dir.join(format!("{}.json", filename))
    }

    async fn ensure_dir(&self) -> Result<()> {
        if !fs::try_exists(&self.cache_dir).await? {
            fs::create_dir_all(&self.cache_dir).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl CacheBackend for FileSystemStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.get_path_for_key(key);
        if fs::try_exists(&path).await? {
            Ok(Some(fs::read_to_string(path).await?))
        } else {
            Ok(None)
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir().await?;
        fs::write(self.get_path_for_key(key), value).await?;
        Ok(())
    }
}
