//! Durable, human-readable persistence for the digest cache.
//!
//! The cache is a single pretty-printed JSON document at a well-known path,
//! wholly replaced on every successful refresh. Replacement is atomic:
//! the new snapshot is written to a sibling temp file and renamed over the
//! old document, so a concurrent reader never observes a partial write.
//!
//! Readers get two distinct failures: [`Error::CacheNotFound`] when no
//! document exists yet (callers translate this into "no data yet, trigger a
//! refresh") and [`Error::CacheCorrupt`] when a document exists but does not
//! parse. Corruption is fatal for the read and never auto-repaired, so
//! operators can tell "never refreshed" apart from "storage went bad".

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{info, instrument};

use crate::error::{Error, Result};
use crate::models::CacheSnapshot;

/// Reads and atomically replaces the cache document at a fixed path.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `snapshot` as the new cache document, replacing any prior one.
    ///
    /// # Errors
    ///
    /// Fails if the parent directory cannot be created or the document
    /// cannot be written and renamed into place.
    #[instrument(level = "info", skip_all, fields(path = %self.path.display()))]
    pub async fn save(&self, snapshot: &CacheSnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        // Temp file lives next to the target so the rename stays on one
        // filesystem and therefore atomic.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;

        info!(articles = snapshot.total_articles, "Wrote cache snapshot");
        Ok(())
    }

    /// Load the current cache document.
    ///
    /// # Errors
    ///
    /// - [`Error::CacheNotFound`] if no document exists at the path
    /// - [`Error::CacheCorrupt`] if the document cannot be parsed
    #[instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<CacheSnapshot> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::CacheNotFound {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|e| Error::CacheCorrupt {
            path: self.path.clone(),
            source: e,
        })
    }
}
