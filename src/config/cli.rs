use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Directory for cached score lookups
    #[arg(long, global = true, default_value = "cache", env = "FILMSCORE_CACHE_DIR")]
    pub cache_dir: PathBuf,

    /// Keep the cache in memory only (nothing is written to disk)
    #[arg(long, global = true)]
    pub memory_cache: bool,

    /// Optional JSON file overriding the site endpoints
    #[arg(long, global = true, env = "FILMSCORE_SITE_CONFIG")]
    pub site_config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Keep trying later strategies to fill a missing critic or user score
    #[arg(long, global = true)]
    pub complete_partial: bool,

    /// Maximum titles resolved at once in batch mode
    #[arg(long, global = true, default_value_t = 4)]
    pub concurrency: usize,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve one or more titles and print their scores as JSON
    Resolve {
        #[arg(required = true)]
        titles: Vec<String>,
    },
    /// Resolve every line of a file
    Batch {
        /// File with one title per line
        #[arg(long)]
        input: PathBuf,

        /// Write the JSON results here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the cache key and slug derived from each title
    Normalize {
        #[arg(required = true)]
        titles: Vec<String>,
    },
}
