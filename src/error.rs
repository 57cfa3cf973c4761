//! Crate-wide error type.
//!
//! Callers need to tell three read-side conditions apart: a cache that was
//! never written ([`Error::CacheNotFound`]), a cache that exists but does not
//! parse ([`Error::CacheCorrupt`]), and everything else. The write side keeps
//! fetch faults distinct from completion faults because the former aborts a
//! refresh while the latter only skips one article.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no cached digest at {}; run a refresh first", .path.display())]
    CacheNotFound { path: PathBuf },

    #[error("cached digest at {} is not a valid snapshot: {source}", .path.display())]
    CacheCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("fetching articles failed: {0}")]
    Fetch(String),

    #[error("completion request failed: {0}")]
    Completion(String),

    #[error("a refresh is already running")]
    RefreshInProgress,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
