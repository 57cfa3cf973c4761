//! # Daily News Digest
//!
//! A daily news summarization pipeline: fetch a bounded batch of articles,
//! normalize and deduplicate them, summarize each one through a language
//! model, and persist the result as a flat JSON cache that consumers query
//! and filter by category.
//!
//! ## Architecture
//!
//! The pipeline runs in one direction:
//! 1. **Fetch**: a [`fetch::FetchArticles`] collaborator returns raw records
//! 2. **Preprocess**: [`preprocess::preprocess`] normalizes, dedups, bounds
//! 3. **Summarize**: [`summarize::summarize`] makes one model call per
//!    article, skipping (and recording) per-article failures
//! 4. **Persist**: [`cache::CacheStore`] atomically replaces the cache
//!    document
//!
//! [`categories`] provides the read-side projections (distinct category
//! listing, category filtering) over a persisted snapshot, and
//! [`pipeline::Pipeline`] composes everything into the refresh-plus-query
//! surface consumers call.
//!
//! ## Failure semantics
//!
//! A failed model call skips one article; a failed fetch fails the whole
//! refresh and leaves the previous cache untouched; a missing cache is
//! reported distinctly from a corrupt one. See [`error::Error`].

pub mod api;
pub mod cache;
pub mod categories;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod pipeline;
pub mod preprocess;
pub mod summarize;

pub use error::{Error, Result};
pub use models::{
    CacheSnapshot, CategoryList, ProcessedArticle, RawArticle, RefreshReport, SummaryFailure,
    SummaryRecord,
};
pub use pipeline::Pipeline;
