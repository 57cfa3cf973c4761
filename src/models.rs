//! Data models for news articles as they move through the pipeline.
//!
//! This module defines the core data structures used throughout the crate:
//! - [`RawArticle`]: Untrusted article data as returned by the news feed
//! - [`ProcessedArticle`]: A raw article after normalization and dedup
//! - [`SummaryRecord`]: One summarized article plus its metadata
//! - [`CacheSnapshot`]: The complete, replaceable result of one pipeline run
//! - [`RefreshReport`] / [`SummaryFailure`]: Observability for a refresh
//! - [`CategoryList`]: The distinct categories present in a snapshot
//!
//! Feed input is deserialized leniently: fields may be absent, null, or
//! carry a non-string scalar, and the `category` field may be a single
//! string or an array of strings depending on the source feed. All of that
//! is coerced here so downstream code never branches on shape.

use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel used for any article field the source feed did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// A raw news article as returned by the news-fetching collaborator.
///
/// Every field is optional because real feeds omit, null out, or mistype
/// fields freely. Deserialization never rejects an entry: scalar values of
/// the wrong JSON type are coerced to their string rendering, and anything
/// unusable collapses to `None`. Normalization to concrete values happens
/// in [`preprocess`](crate::preprocess::preprocess).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticle {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    /// May arrive as `"sports"` or `["sports", "business"]`; kept as a
    /// list here, possibly empty.
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub category: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
}

/// A normalized article, ready for summarization.
///
/// Every field is a concrete `String` ([`NOT_AVAILABLE`] where the feed had
/// nothing usable) and `category` is always a non-empty ordered list, so
/// nothing downstream has to branch on absence. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedArticle {
    pub title: String,
    pub description: String,
    pub category: Vec<String>,
    pub source: String,
    pub date: String,
    pub url: String,
}

/// One summarized article plus the metadata carried through from its input.
///
/// Produced exactly once per successfully summarized article and never
/// mutated afterwards. `category` serializes as an array; a bare string is
/// still accepted on deserialization because cache documents may carry
/// whichever shape the feed happened to deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub title: String,
    /// The model-generated summary text.
    pub summary: String,
    #[serde(deserialize_with = "string_or_list")]
    pub category: Vec<String>,
    pub source: String,
    pub date: String,
    pub url: String,
}

/// The complete result of one pipeline run, and the sole persisted state.
///
/// A snapshot is a value, not a log: each successful refresh wholly replaces
/// the previous one. The invariant `total_articles == summaries.len()` is
/// maintained by constructing snapshots through [`CacheSnapshot::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    pub total_articles: usize,
    pub summaries: Vec<SummaryRecord>,
}

impl CacheSnapshot {
    /// Build a snapshot from summary records, recomputing the count.
    pub fn new(summaries: Vec<SummaryRecord>) -> Self {
        Self {
            total_articles: summaries.len(),
            summaries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

/// One article that was skipped because its completion call failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryFailure {
    pub title: String,
    pub reason: String,
}

/// What a refresh run produced, beyond the snapshot itself.
///
/// `fetched` counts raw feed entries, `processed` counts entries that
/// survived dedup and truncation, and `failures` lists every article the
/// summarizer had to skip. `processed` always equals
/// `snapshot.total_articles + failures.len()`.
#[derive(Debug)]
pub struct RefreshReport {
    pub snapshot: CacheSnapshot,
    pub fetched: usize,
    pub processed: usize,
    pub failures: Vec<SummaryFailure>,
}

/// The distinct categories present in a snapshot.
///
/// `total` is the number of distinct categories; per-article counts belong
/// to snapshots, not to this listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryList {
    pub categories: Vec<String>,
    pub total: usize,
}

fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    let text = match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Accept any JSON scalar where a string is expected; `null`, containers,
/// and blank strings become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value))
}

/// Accept a single scalar or an array of scalars; anything unusable is
/// dropped rather than rejected.
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match &value {
        serde_json::Value::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
        other => scalar_to_string(other).into_iter().collect(),
    })
}

/// Accept the documented `string | array of string` cache schema for
/// `SummaryRecord::category`.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }

    Ok(match StringOrList::deserialize(deserializer)? {
        StringOrList::One(s) => vec![s],
        StringOrList::Many(list) => list,
    })
}
