use chrono::Local;
use clap::Parser;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use daily_news_digest::api::ChatClient;
use daily_news_digest::cache::CacheStore;
use daily_news_digest::cli::{Cli, Command};
use daily_news_digest::config::Config;
use daily_news_digest::fetch::HttpNewsSource;
use daily_news_digest::{Pipeline, Result};

#[tokio::main]
#[instrument]
async fn main() -> Result<()> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("daily_news_digest starting up");

    // Parse CLI and merge overrides into the configuration
    let args = Cli::parse();
    debug!(?args.config, ?args.cache_path, "Parsed CLI arguments");

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(cache_path) = args.cache_path {
        config.cache_path = cache_path;
    }
    if let Some(limit) = args.limit {
        config.article_limit = limit;
    }
    if args.news_api_key.is_some() {
        config.news_api_key = args.news_api_key;
    }
    if args.model_api_key.is_some() {
        config.model_api_key = args.model_api_key;
    }

    // ---- Wire up the pipeline ----
    let fetcher = HttpNewsSource::new(&config.news_endpoint, config.news_api_key.as_deref())?;
    let model = ChatClient::new(
        &config.model_base_url,
        config.model_api_key.clone(),
        &config.model_name,
    );
    let store = CacheStore::new(&config.cache_path);
    let pipeline = Pipeline::new(fetcher, model, store, config.article_limit);

    match args.command {
        Command::Refresh => {
            info!(
                endpoint = %config.news_endpoint,
                model = %config.model_name,
                limit = config.article_limit,
                "Starting refresh"
            );
            let report = pipeline.refresh().await?;

            println!(
                "Digest for {}: {} of {} articles summarized ({} fetched)",
                Local::now().date_naive(),
                report.snapshot.total_articles,
                report.processed,
                report.fetched
            );
            for (i, record) in report.snapshot.summaries.iter().enumerate() {
                println!("\n--- Article {} ---", i + 1);
                println!("Title: {}", record.title);
                println!("Summary: {}", record.summary);
                println!("Source: {}", record.source);
            }
            if !report.failures.is_empty() {
                println!("\nSkipped {} article(s):", report.failures.len());
                for failure in &report.failures {
                    println!("  {}: {}", failure.title, failure.reason);
                }
            }
            println!("\nSaved to {}", config.cache_path.display());
        }
        Command::Show { category } => {
            let snapshot = match category {
                Some(category) => pipeline.by_category(&category).await?,
                None => pipeline.latest().await?,
            };
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Command::Categories => {
            let list = pipeline.categories().await?;
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}
