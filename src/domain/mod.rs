mod scores;
pub(crate) mod storage;

pub use scores::{CacheEntry, ScorePair};
pub use storage::{CacheBackend, StorageKeys};
