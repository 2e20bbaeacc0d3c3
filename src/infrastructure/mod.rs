mod clients;
mod http;
mod sources;
mod storage;

pub use clients::metacritic::{extract_detail_slug, ScoreSite};
pub use http::{Fetcher, HttpFetcher};
pub use sources::{detail_page::DetailPageSource, search::SearchSource, SourceAdapter};
pub use storage::{fs_store::FileSystemStore, memory_store::MemoryStore};
