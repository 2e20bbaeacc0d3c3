use crate::domain::ScorePair;
use crate::error::{Result, ScoreError};
use crate::services::normalize::TitleNormalizer;
use crate::services::resolver::Resolver;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct TitleScores {
    pub title: String,
    pub key: String,
    #[serde(flatten)]
    pub scores: ScorePair,
}

pub struct BatchRunner {
    resolver: Resolver,
    concurrency: usize,
}

impl BatchRunner {
    pub fn new(resolver: Resolver, concurrency: usize) -> Self {
        Self {
            resolver,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn read_titles(path: &Path) -> Result<Vec<String>> {
        info!("Reading titles from {:?}", path);
        let content = tokio::fs::read_to_string(path).await?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub async fn run(&self, titles: Vec<String>, show_progress: bool) -> Result<Vec<TitleScores>> {
        let pb = if show_progress {
            let pb = ProgressBar::new(titles.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                    .map_err(|e| ScoreError::Other(e.to_string()))?,
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let results = stream::iter(titles)
            .map(|title| {
                let resolver = self.resolver.clone();
                let pb = pb.clone();
                async move {
                    let scores = resolver.resolve(&title).await;
                    pb.set_message(title.clone());
                    pb.inc(1);
                    TitleScores {
                        key: TitleNormalizer::normalize(&title),
                        title,
                        scores,
                    }
                }
            })
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .await;

        pb.finish_with_message("done");
        info!("Resolved {} titles", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{MemoryStore, SourceAdapter};
    use crate::services::cache::CacheStore;
    use crate::services::resolver::ResolverOptions;
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::Arc;

    struct LengthSource;

    #[async_trait]
    impl SourceAdapter for LengthSource {
        fn name(&self) -> &'static str {
            "length"
        }

        async fn try_fetch(&self, raw_title: &str) -> Option<ScorePair> {
            Some(ScorePair::new(Some(raw_title.len() as u8), None))
        }
    }

    #[tokio::test]
    async fn keeps_input_order() {
        let sources: Vec<Arc<dyn SourceAdapter>> = vec![Arc::new(LengthSource)];
        let resolver = Resolver::new(
            CacheStore::new(Arc::new(MemoryStore::new())),
            sources,
            ResolverOptions::default(),
        );
        let runner = BatchRunner::new(resolver, 3);

        let titles = vec!["Up".to_string(), "".to_string(), "The Matrix".to_string()];
        let results = runner.run(titles, false).await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].scores.critic, Some(2));
        assert_eq!(results[1].key, "");
        assert!(results[1].scores.is_empty());
        assert_eq!(results[2].key, "matrix");
        assert_eq!(results[2].scores.critic, Some(10));
    }

    #[tokio::test]
    async fn reads_non_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  Wonka Subtitulada \n\n\tBarbie\n").unwrap();

        let titles = BatchRunner::read_titles(file.path()).await.unwrap();
        assert_eq!(titles, vec!["Wonka Subtitulada", "Barbie"]);
    }

    #[test]
    fn output_flattens_scores() {
        let row = TitleScores {
            title: "Barbie".to_string(),
            key: "barbie".to_string(),
            scores: ScorePair::new(Some(80), Some(6.9)),
        };
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"title":"Barbie","key":"barbie","critic":80,"user":6.9}"#
        );
    }
}
