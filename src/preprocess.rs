//! Normalization, deduplication, and batch bounding for raw feed entries.
//!
//! Preprocessing has no failure mode: malformed entries are coerced, never
//! rejected, so every entry that survives dedup and truncation reaches the
//! summarizer.

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::models::{NOT_AVAILABLE, ProcessedArticle, RawArticle};

/// Normalize, deduplicate, and bound a batch of raw articles.
///
/// - Missing fields default to [`NOT_AVAILABLE`]; `category` becomes a
///   non-empty ordered list (`["N/A"]` when the feed had none).
/// - Duplicates are dropped by case-insensitive title plus url; the first
///   occurrence wins and input order is preserved.
/// - The batch is truncated to at most `limit` entries, earliest-first.
#[instrument(level = "debug", skip_all, fields(input = raw.len(), limit = limit))]
pub fn preprocess(raw: Vec<RawArticle>, limit: usize) -> Vec<ProcessedArticle> {
    let articles: Vec<ProcessedArticle> = raw
        .into_iter()
        .map(normalize)
        .unique_by(|a| (a.title.to_lowercase(), a.url.clone()))
        .take(limit)
        .collect();
    debug!(output = articles.len(), "Preprocessed raw articles");
    articles
}

fn normalize(raw: RawArticle) -> ProcessedArticle {
    let category = if raw.category.is_empty() {
        vec![NOT_AVAILABLE.to_string()]
    } else {
        raw.category
    };

    ProcessedArticle {
        title: raw.title.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        description: raw.description.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        category,
        source: raw.source.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        date: raw.date.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        url: raw.url.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}
