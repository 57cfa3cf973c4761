//! The news-fetching collaborator seam.
//!
//! Fetching is external to the pipeline: anything that can produce a list of
//! [`RawArticle`] records will do. [`HttpNewsSource`] is the production
//! implementation, pulling a JSON feed over HTTP; tests swap in an
//! in-process fake.

use serde::Deserialize;
use tracing::{info, instrument};
use url::Url;

use crate::error::{Error, Result};
use crate::models::RawArticle;

/// Async source of raw article records.
pub trait FetchArticles {
    /// Fetch the current batch of raw articles.
    ///
    /// A failure here is fatal for the whole refresh; there is no partial
    /// result and no retry.
    async fn fetch(&self) -> Result<Vec<RawArticle>>;
}

/// News feeds either return a bare JSON array of articles or wrap it in an
/// envelope, NewsAPI-style.
#[derive(Deserialize)]
#[serde(untagged)]
enum FeedPayload {
    Wrapped { articles: Vec<RawArticle> },
    Bare(Vec<RawArticle>),
}

/// Fetches articles from a JSON news endpoint.
#[derive(Debug)]
pub struct HttpNewsSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpNewsSource {
    /// Build a source for `endpoint`, appending `apiKey` when a key is given.
    pub fn new(endpoint: &str, api_key: Option<&str>) -> Result<Self> {
        let mut endpoint =
            Url::parse(endpoint).map_err(|e| Error::Fetch(format!("invalid endpoint: {e}")))?;
        if let Some(key) = api_key {
            endpoint.query_pairs_mut().append_pair("apiKey", key);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }
}

impl FetchArticles for HttpNewsSource {
    #[instrument(level = "info", skip_all, fields(endpoint = %self.endpoint.host_str().unwrap_or("?")))]
    async fn fetch(&self) -> Result<Vec<RawArticle>> {
        let payload = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Fetch(e.to_string()))?
            .json::<FeedPayload>()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        let articles = match payload {
            FeedPayload::Wrapped { articles } => articles,
            FeedPayload::Bare(articles) => articles,
        };
        info!(count = articles.len(), "Fetched raw articles");
        Ok(articles)
    }
}
