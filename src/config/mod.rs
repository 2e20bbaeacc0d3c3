use crate::error::{Result, ScoreError};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub(crate) mod cli;

pub use cli::{Args, Command};

/// `{slug}` and `{query}` are substituted at request time.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
    pub mirror_prefix: String,
    pub detail_path: String,
    pub search_path: String,
    pub legacy_search_path: String,
    pub user_agent: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.metacritic.com".to_string(),
            mirror_prefix: "https://r.jina.ai/".to_string(),
            detail_path: "/movie/{slug}/".to_string(),
            search_path: "/search/{query}/?category=2".to_string(),
            legacy_search_path: "/search/movie/{query}/results".to_string(),
            user_agent: None,
        }
    }
}

impl SiteConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let site: SiteConfig = serde_json::from_str(&content)?;
        if site.base_url.is_empty() {
            return Err(ScoreError::Config(format!(
                "{} does not define a base_url",
                path.display()
            )));
        }
        Ok(site)
    }

    pub fn detail_url(&self, slug: &str) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.detail_path.replace("{slug}", slug)
        )
    }

    pub fn search_urls(&self, query: &str) -> [String; 2] {
        let base = self.base_url.trim_end_matches('/');
        [
            format!("{}{}", base, self.search_path.replace("{query}", query)),
            format!("{}{}", base, self.legacy_search_path.replace("{query}", query)),
        ]
    }

    pub fn with_mirror(&self, url: String) -> Vec<String> {
        if self.mirror_prefix.is_empty() {
            vec![url]
        } else {
            let mirrored = format!("{}{}", self.mirror_prefix, url);
            vec![url, mirrored]
        }
    }
}

pub struct Config {
    pub args: Args,
    pub site_config: SiteConfig,
    pub http_client: Client,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        let site_config = match &args.site_config {
            Some(path) => {
                info!("Loading site config from {:?}", path);
                SiteConfig::load(path)?
            }
            None => SiteConfig::default(),
        };

        let http_client = build_client(&site_config, Duration::from_secs(args.timeout_secs))?;

        Ok(Self {
            args,
            site_config,
            http_client,
        })
    }
}

pub fn build_client(site: &SiteConfig, timeout: Duration) -> Result<Client> {
    let mut builder = Client::builder().timeout(timeout);
    if let Some(agent) = &site.user_agent {
        builder = builder.user_agent(agent.as_str());
    }
    Ok(builder.build()?)
}
