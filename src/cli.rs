//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and subcommands using the `clap`
//! crate. The subcommands map one-to-one onto the query surface consumers
//! use: refresh the digest, show it (optionally filtered), list categories.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line arguments for the daily news digest.
///
/// # Examples
///
/// ```sh
/// # Rebuild the cached digest
/// daily_news_digest refresh
///
/// # Print the cached digest, or just one category of it
/// daily_news_digest show
/// daily_news_digest show --category sports
///
/// # List the categories present in the cache
/// daily_news_digest categories
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the cache document location
    #[arg(long)]
    pub cache_path: Option<PathBuf>,

    /// Override the per-refresh article limit
    #[arg(long)]
    pub limit: Option<usize>,

    /// News feed API key
    #[arg(long, env = "NEWS_API_KEY")]
    pub news_api_key: Option<String>,

    /// Model API key
    #[arg(long, env = "MODEL_API_KEY")]
    pub model_api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch, summarize, and replace the cached digest
    Refresh,
    /// Print the cached digest as JSON
    Show {
        /// Only records matching this category (case-insensitive)
        #[arg(long)]
        category: Option<String>,
    },
    /// List the categories present in the cached digest
    Categories,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_refresh() {
        let cli = Cli::parse_from(["daily_news_digest", "refresh"]);
        assert!(matches!(cli.command, Command::Refresh));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_parsing_show_with_category() {
        let cli = Cli::parse_from(["daily_news_digest", "show", "--category", "sports"]);
        let Command::Show { category } = cli.command else {
            panic!("expected show");
        };
        assert_eq!(category.as_deref(), Some("sports"));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "daily_news_digest",
            "--config",
            "digest.yaml",
            "--cache-path",
            "/tmp/cache.json",
            "--limit",
            "5",
            "categories",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("digest.yaml")));
        assert_eq!(cli.cache_path, Some(PathBuf::from("/tmp/cache.json")));
        assert_eq!(cli.limit, Some(5));
        assert!(matches!(cli.command, Command::Categories));
    }
}
