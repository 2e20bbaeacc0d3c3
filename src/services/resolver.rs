use crate::domain::ScorePair;
use crate::infrastructure::{DetailPageSource, ScoreSite, SearchSource, SourceAdapter};
use crate::services::cache::CacheStore;
use crate::services::normalize::TitleNormalizer;
use futures::future::{BoxFuture, FutureExt, Shared};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

type PendingLookup = Shared<BoxFuture<'static, ScorePair>>;

#[derive(Debug, Clone, Copy, Default)]
pub struct ResolverOptions {
    /// When a source returns only one of the two scores, keep asking later
    /// sources for the missing one instead of stopping.
    pub complete_partial: bool,
}

#[derive(Clone)]
pub struct Resolver {
    inner: Arc<ResolverInner>,
}

struct ResolverInner {
    cache: CacheStore,
    sources: Vec<Arc<dyn SourceAdapter>>,
    options: ResolverOptions,
    in_flight: Mutex<FxHashMap<String, PendingLookup>>,
}

impl Resolver {
    pub fn new(
        cache: CacheStore,
        sources: Vec<Arc<dyn SourceAdapter>>,
        options: ResolverOptions,
    ) -> Self {
        info!(
            "Created resolver with sources: {}",
            sources
                .iter()
                .map(|s| s.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Self {
            inner: Arc::new(ResolverInner {
                cache,
                sources,
                options,
                in_flight: Mutex::new(FxHashMap::default()),
            }),
        }
    }

    pub fn with_site(cache: CacheStore, site: Arc<ScoreSite>, options: ResolverOptions) -> Self {
        let sources: Vec<Arc<dyn SourceAdapter>> = vec![
            Arc::new(DetailPageSource::new(site.clone())),
            Arc::new(SearchSource::new(site)),
        ];
        Self::new(cache, sources, options)
    }

    pub async fn resolve(&self, raw_title: &str) -> ScorePair {
        let key = TitleNormalizer::normalize(raw_title);
        if key.is_empty() {
            debug!("Title '{}' normalizes to nothing", raw_title);
            return ScorePair::empty();
        }

        let pending = {
            let mut in_flight = self.inner.in_flight.lock().await;
            match in_flight.get(&key) {
                Some(pending) => {
                    debug!("Joining in-flight lookup for '{}'", key);
                    pending.clone()
                }
                None => {
                    let inner = self.inner.clone();
                    let lookup_key = key.clone();
                    let raw_title = raw_title.to_string();
                    let pending = async move { inner.resolve_key(lookup_key, raw_title).await }
                        .boxed()
                        .shared();
                    in_flight.insert(key, pending.clone());
                    pending
                }
            }
        };

        pending.await
    }
}

impl ResolverInner {
    async fn resolve_key(self: Arc<Self>, key: String, raw_title: String) -> ScorePair {
        let scores = self.lookup(&key, &raw_title).await;
        // The entry is already cached here, so late callers hit the cache.
        self.in_flight.lock().await.remove(&key);
        scores
    }

    async fn lookup(&self, key: &str, raw_title: &str) -> ScorePair {
        if let Some(entry) = self.cache.get(key).await {
            debug!("Cache hit for '{}'", key);
            return entry.scores;
        }

        let scores = self.run_sources(raw_title).await;
        info!(
            "Resolved '{}': critic={:?} user={:?}",
            key, scores.critic, scores.user
        );
        self.cache.put(key, scores).await;
        scores
    }

    async fn run_sources(&self, raw_title: &str) -> ScorePair {
        let mut found: Option<ScorePair> = None;

        for source in &self.sources {
            let Some(scores) = source.try_fetch(raw_title).await else {
                debug!("Source '{}' had nothing for '{}'", source.name(), raw_title);
                continue;
            };

            let merged = match found {
                Some(previous) => previous.fill_missing(scores),
                None => scores,
            };
            if !self.options.complete_partial || merged.is_complete() {
                return merged;
            }
            found = Some(merged);
        }

        found.unwrap_or_default()
    }
}
