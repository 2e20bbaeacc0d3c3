use crate::domain::{CacheBackend, CacheEntry, ScorePair, StorageKeys};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

/// How long a resolved pair (including a fully absent one) is honored.
pub const RETENTION_DAYS: i64 = 14;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub struct CacheStore {
    backend: Arc<dyn CacheBackend>,
    clock: Arc<dyn Clock>,
    retention: Duration,
}

impl CacheStore {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self::with_clock(backend, Arc::new(SystemClock))
    }

    pub fn with_clock(backend: Arc<dyn CacheBackend>, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            clock,
            retention: Duration::days(RETENTION_DAYS),
        }
    }

    pub async fn get(&self, key: &str) -> Option<CacheEntry> {
        let raw = match self.backend.get(&StorageKeys::score_key(key)).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Cache read failed for '{}': {}", key, e);
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Discarding unreadable cache entry for '{}': {}", key, e);
                return None;
            }
        };

        if self.clock.now() - entry.created_at > self.retention {
            debug!("Cache entry for '{}' expired", key);
            return None;
        }

        Some(entry)
    }

    pub async fn put(&self, key: &str, scores: ScorePair) {
        let entry = CacheEntry::new(scores, self.clock.now());
        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not serialize cache entry for '{}': {}", key, e);
                return;
            }
        };

        if let Err(e) = self.backend.set(&StorageKeys::score_key(key), &raw).await {
            warn!("Cache write failed for '{}': {}", key, e);
        }
    }
}
