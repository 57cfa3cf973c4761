//! Per-article summarization with partial-failure tolerance.
//!
//! Each article is summarized with one blocking model call, strictly one
//! after another; this loop is the dominant cost of the whole pipeline.
//! A failed call never aborts the batch: the article is skipped, the
//! failure is logged and recorded, and the loop moves on.

use tracing::{debug, info, instrument, warn};

use crate::api::{CompleteAsync, Prompt};
use crate::models::{CacheSnapshot, ProcessedArticle, SummaryFailure, SummaryRecord};

const SYSTEM_PROMPT: &str =
    "You are a news summarizer. Summarize the given article in 3-4 lines. Keep facts accurate.";

/// A snapshot of the articles that summarized successfully, plus a record
/// of every article that did not.
#[derive(Debug)]
pub struct SummarizeOutcome {
    pub snapshot: CacheSnapshot,
    pub failures: Vec<SummaryFailure>,
}

/// Build the fixed two-part prompt for one article.
pub fn prompt_for(article: &ProcessedArticle) -> Prompt {
    Prompt {
        system: SYSTEM_PROMPT.to_string(),
        user: format!(
            "Summarize this article:\n\nTitle: {}\nDescription: {}\n",
            article.title, article.description
        ),
    }
}

/// Summarize every article in input order.
///
/// The resulting snapshot holds one [`SummaryRecord`] per successful call,
/// in the order the articles arrived; `total_articles` equals the success
/// count, which may be less than the input count.
#[instrument(level = "info", skip_all, fields(articles = articles.len()))]
pub async fn summarize(
    model: &impl CompleteAsync,
    articles: &[ProcessedArticle],
) -> SummarizeOutcome {
    let mut summaries = Vec::with_capacity(articles.len());
    let mut failures = Vec::new();

    for (i, article) in articles.iter().enumerate() {
        debug!(index = i, title = %article.title, "Summarizing article");
        match model.complete(&prompt_for(article)).await {
            Ok(summary) => summaries.push(SummaryRecord {
                title: article.title.clone(),
                summary,
                category: article.category.clone(),
                source: article.source.clone(),
                date: article.date.clone(),
                url: article.url.clone(),
            }),
            Err(e) => {
                warn!(index = i, title = %article.title, error = %e, "Summarization failed; skipping article");
                failures.push(SummaryFailure {
                    title: article.title.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        total = articles.len(),
        successful = summaries.len(),
        failed = failures.len(),
        "Completed article summarization"
    );
    SummarizeOutcome {
        snapshot: CacheSnapshot::new(summaries),
        failures,
    }
}
