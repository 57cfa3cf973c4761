//! The refresh orchestrator and the query surface over the cache.
//!
//! A [`Pipeline`] owns the two external collaborators (news fetcher and
//! language model), the cache store, and the article limit. `refresh()`
//! composes fetch → preprocess → summarize → save into one complete,
//! independent run; the read operations (`latest`, `by_category`,
//! `categories`) only ever touch the persisted cache and may run
//! concurrently with a refresh.

use tokio::sync::Mutex;
use tracing::{info, instrument};

use crate::api::CompleteAsync;
use crate::cache::CacheStore;
use crate::categories::{filter_by_category, list_categories};
use crate::error::{Error, Result};
use crate::fetch::FetchArticles;
use crate::models::{CacheSnapshot, CategoryList, RefreshReport};
use crate::preprocess::preprocess;
use crate::summarize::{SummarizeOutcome, summarize};

/// Composes the pipeline stages over a fetcher `F` and model `C`.
pub struct Pipeline<F, C> {
    fetcher: F,
    model: C,
    store: CacheStore,
    article_limit: usize,
    // Single-flight gate: held for the whole of refresh() so two
    // concurrent refreshes cannot interleave cache writes.
    refresh_gate: Mutex<()>,
}

impl<F, C> Pipeline<F, C>
where
    F: FetchArticles,
    C: CompleteAsync,
{
    pub fn new(fetcher: F, model: C, store: CacheStore, article_limit: usize) -> Self {
        Self {
            fetcher,
            model,
            store,
            article_limit,
            refresh_gate: Mutex::new(()),
        }
    }

    /// Run one complete refresh: fetch, preprocess, summarize, persist.
    ///
    /// A fetch failure aborts the run before anything is written, leaving
    /// the previous cache snapshot valid and untouched. Per-article
    /// summarization failures do not abort; they are reported in the
    /// returned [`RefreshReport`].
    ///
    /// # Errors
    ///
    /// - [`Error::RefreshInProgress`] if another refresh is already running
    /// - [`Error::Fetch`] if the news collaborator fails
    /// - IO/serialization errors if the new snapshot cannot be persisted
    #[instrument(level = "info", skip_all)]
    pub async fn refresh(&self) -> Result<RefreshReport> {
        let _running = self
            .refresh_gate
            .try_lock()
            .map_err(|_| Error::RefreshInProgress)?;

        let raw = self.fetcher.fetch().await?;
        let fetched = raw.len();

        let articles = preprocess(raw, self.article_limit);
        let processed = articles.len();

        let SummarizeOutcome { snapshot, failures } = summarize(&self.model, &articles).await;
        self.store.save(&snapshot).await?;

        info!(
            fetched,
            processed,
            successful = snapshot.total_articles,
            failed = failures.len(),
            "Refresh completed"
        );
        Ok(RefreshReport {
            snapshot,
            fetched,
            processed,
            failures,
        })
    }

    /// The current cached snapshot, in full.
    pub async fn latest(&self) -> Result<CacheSnapshot> {
        self.store.load().await
    }

    /// The cached snapshot projected down to one category.
    pub async fn by_category(&self, category: &str) -> Result<CacheSnapshot> {
        Ok(filter_by_category(&self.store.load().await?, category))
    }

    /// The distinct categories present in the cached snapshot.
    pub async fn categories(&self) -> Result<CategoryList> {
        Ok(list_categories(&self.store.load().await?))
    }
}
