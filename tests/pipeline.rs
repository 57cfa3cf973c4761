//! End-to-end pipeline tests with in-process collaborators.

use std::time::Duration;

use tempfile::tempdir;

use daily_news_digest::api::{CompleteAsync, Prompt};
use daily_news_digest::cache::CacheStore;
use daily_news_digest::categories::{filter_by_category, list_categories};
use daily_news_digest::fetch::FetchArticles;
use daily_news_digest::{Error, Pipeline, RawArticle, Result};

/// Returns a fixed batch of raw articles, after an optional delay.
struct FakeFeed {
    payload: serde_json::Value,
    delay: Duration,
}

impl FakeFeed {
    fn new(payload: serde_json::Value) -> Self {
        Self {
            payload,
            delay: Duration::ZERO,
        }
    }
}

impl FetchArticles for FakeFeed {
    async fn fetch(&self) -> Result<Vec<RawArticle>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        serde_json::from_value(self.payload.clone()).map_err(|e| Error::Fetch(e.to_string()))
    }
}

/// Always fails, standing in for a feed outage.
struct DeadFeed;

impl FetchArticles for DeadFeed {
    async fn fetch(&self) -> Result<Vec<RawArticle>> {
        Err(Error::Fetch("connection refused".to_string()))
    }
}

/// Deterministic model: echoes a summary derived from the prompt.
struct FakeModel;

impl CompleteAsync for FakeModel {
    async fn complete(&self, prompt: &Prompt) -> Result<String> {
        let title = prompt
            .user
            .lines()
            .find_map(|line| line.strip_prefix("Title: "))
            .unwrap_or("?");
        Ok(format!("three to four lines about {title}"))
    }
}

fn daily_feed() -> serde_json::Value {
    serde_json::json!([
        {"title": "A", "description": "d1"},
        {"title": "A", "description": "d1"},
        {"title": "B", "description": "d2", "category": "sports"}
    ])
}

#[tokio::test]
async fn test_refresh_end_to_end() {
    let dir = tempdir().unwrap();
    let cache_path = dir.path().join("digest.json");
    let pipeline = Pipeline::new(
        FakeFeed::new(daily_feed()),
        FakeModel,
        CacheStore::new(&cache_path),
        10,
    );

    let report = pipeline.refresh().await.unwrap();

    // duplicate A collapses, so 3 fetched becomes 2 processed
    assert_eq!(report.fetched, 3);
    assert_eq!(report.processed, 2);
    assert!(report.failures.is_empty());

    let snapshot = &report.snapshot;
    assert_eq!(snapshot.total_articles, 2);
    assert_eq!(snapshot.summaries[0].title, "A");
    assert_eq!(snapshot.summaries[1].title, "B");
    assert_eq!(snapshot.summaries[0].category, vec!["N/A"]);
    assert_eq!(snapshot.summaries[1].category, vec!["sports"]);

    let list = list_categories(snapshot);
    assert_eq!(list.categories, vec!["N/A", "sports"]);
    assert_eq!(list.total, 2);

    let sports = filter_by_category(snapshot, "sports");
    assert_eq!(sports.total_articles, 1);
    assert_eq!(sports.summaries[0].title, "B");

    // the persisted document matches what refresh returned
    let reloaded = pipeline.latest().await.unwrap();
    assert_eq!(&reloaded, snapshot);
}

#[tokio::test]
async fn test_query_surface_reads_the_cache() {
    let dir = tempdir().unwrap();
    let cache_path = dir.path().join("digest.json");
    let pipeline = Pipeline::new(
        FakeFeed::new(daily_feed()),
        FakeModel,
        CacheStore::new(&cache_path),
        10,
    );

    // before any refresh, every read reports the cache as missing
    assert!(matches!(
        pipeline.latest().await,
        Err(Error::CacheNotFound { .. })
    ));
    assert!(matches!(
        pipeline.by_category("sports").await,
        Err(Error::CacheNotFound { .. })
    ));
    assert!(matches!(
        pipeline.categories().await,
        Err(Error::CacheNotFound { .. })
    ));

    pipeline.refresh().await.unwrap();

    let sports = pipeline.by_category("SPORTS").await.unwrap();
    assert_eq!(sports.total_articles, 1);

    let unknown = pipeline.by_category("weather").await.unwrap();
    assert_eq!(unknown.total_articles, 0);

    let list = pipeline.categories().await.unwrap();
    assert_eq!(list.total, 2);
}

#[tokio::test]
async fn test_failed_fetch_leaves_previous_cache() {
    let dir = tempdir().unwrap();
    let cache_path = dir.path().join("digest.json");

    let pipeline = Pipeline::new(
        FakeFeed::new(daily_feed()),
        FakeModel,
        CacheStore::new(&cache_path),
        10,
    );
    let first = pipeline.refresh().await.unwrap();

    let broken = Pipeline::new(DeadFeed, FakeModel, CacheStore::new(&cache_path), 10);
    let err = broken.refresh().await.unwrap_err();
    assert!(matches!(err, Error::Fetch(_)));

    // the earlier snapshot is still there, untouched
    let current = broken.latest().await.unwrap();
    assert_eq!(current, first.snapshot);
}

#[tokio::test]
async fn test_refresh_wholly_replaces_cache() {
    let dir = tempdir().unwrap();
    let cache_path = dir.path().join("digest.json");

    let first = Pipeline::new(
        FakeFeed::new(daily_feed()),
        FakeModel,
        CacheStore::new(&cache_path),
        10,
    );
    first.refresh().await.unwrap();

    let second = Pipeline::new(
        FakeFeed::new(serde_json::json!([
            {"title": "C", "description": "d3", "category": ["business"]}
        ])),
        FakeModel,
        CacheStore::new(&cache_path),
        10,
    );
    second.refresh().await.unwrap();

    let current = second.latest().await.unwrap();
    assert_eq!(current.total_articles, 1);
    assert_eq!(current.summaries[0].title, "C");
    // nothing from the first run is merged in
    assert_eq!(list_categories(&current).categories, vec!["business"]);
}

#[tokio::test]
async fn test_article_limit_bounds_the_batch() {
    let dir = tempdir().unwrap();
    let pipeline = Pipeline::new(
        FakeFeed::new(daily_feed()),
        FakeModel,
        CacheStore::new(dir.path().join("digest.json")),
        1,
    );

    let report = pipeline.refresh().await.unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.snapshot.total_articles, 1);
    assert_eq!(report.snapshot.summaries[0].title, "A");
}

#[tokio::test]
async fn test_concurrent_refresh_is_rejected() {
    let dir = tempdir().unwrap();
    let slow_feed = FakeFeed {
        payload: daily_feed(),
        delay: Duration::from_millis(50),
    };
    let pipeline = Pipeline::new(
        slow_feed,
        FakeModel,
        CacheStore::new(dir.path().join("digest.json")),
        10,
    );

    let (first, second) = tokio::join!(pipeline.refresh(), pipeline.refresh());

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        outcomes
            .iter()
            .any(|r| matches!(r, Err(Error::RefreshInProgress)))
    );

    // the gate is released afterwards, so a later refresh succeeds
    assert!(pipeline.refresh().await.is_ok());
}
