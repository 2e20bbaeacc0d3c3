use clap::Parser;
use filmscore::config::{Args, Command, Config};
use filmscore::domain::CacheBackend;
use filmscore::error::{Result, ScoreError};
use filmscore::infrastructure::{FileSystemStore, HttpFetcher, MemoryStore, ScoreSite};
use filmscore::services::batch::{BatchRunner, TitleScores};
use filmscore::services::cache::CacheStore;
use filmscore::services::normalize::TitleNormalizer;
use filmscore::{Resolver, ResolverOptions};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = Level::from_str(&args.log_level)
        .map_err(|e| ScoreError::Config(format!("invalid log level: {}", e)))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_args(args)?;

    match &config.args.command {
        Command::Normalize { titles } => {
            for title in titles {
                println!(
                    "{}",
                    serde_json::json!({
                        "title": title,
                        "key": TitleNormalizer::normalize(title),
                        "slug": TitleNormalizer::slugify(title),
                    })
                );
            }
        }
        Command::Resolve { titles } => {
            let resolver = build_resolver(&config);
            for title in titles {
                let row = TitleScores {
                    title: title.clone(),
                    key: TitleNormalizer::normalize(title),
                    scores: resolver.resolve(title).await,
                };
                println!("{}", serde_json::to_string(&row)?);
            }
        }
        Command::Batch { input, output } => {
            let runner = BatchRunner::new(build_resolver(&config), config.args.concurrency);
            let titles = BatchRunner::read_titles(input).await?;
            let results = runner.run(titles, output.is_some()).await?;
            let json = serde_json::to_string_pretty(&results)?;

            match output {
                Some(path) => {
                    tokio::fs::write(path, json).await?;
                    info!("Wrote {} results to {:?}", results.len(), path);
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}

fn build_resolver(config: &Config) -> Resolver {
    let backend: Arc<dyn CacheBackend> = if config.args.memory_cache {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileSystemStore::new(&config.args.cache_dir))
    };

    let fetcher = Arc::new(HttpFetcher::new(config.http_client.clone()));
    let site = Arc::new(ScoreSite::new(fetcher, config.site_config.clone()));
    let options = ResolverOptions {
        complete_partial: config.args.complete_partial,
    };

    Resolver::with_site(CacheStore::new(backend), site, options)
}
