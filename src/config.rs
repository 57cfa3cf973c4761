//! Runtime configuration, loaded from a YAML file.
//!
//! Every field has a default so a missing or partial file still yields a
//! runnable configuration; API keys are usually supplied via the
//! environment (see [`crate::cli`]) rather than written into the file.
//!
//! ```yaml
//! news_endpoint: "https://newsapi.org/v2/top-headlines?country=us"
//! model_base_url: "http://localhost:11434/v1"
//! model_name: "qwen2.5:7b-instruct"
//! cache_path: "data/news_summary.json"
//! article_limit: 15
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON news feed endpoint; accepts a bare article array or a
    /// NewsAPI-style `{"articles": [...]}` envelope.
    pub news_endpoint: String,
    /// Key appended to the feed request as `apiKey`, when the feed wants one.
    pub news_api_key: Option<String>,
    /// Base URL of an OpenAI-compatible chat-completions API.
    pub model_base_url: String,
    /// Bearer token for the model API, when it wants one.
    pub model_api_key: Option<String>,
    pub model_name: String,
    /// Where the cache document lives.
    pub cache_path: PathBuf,
    /// Upper bound on articles summarized per refresh.
    pub article_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            news_endpoint: "https://newsapi.org/v2/top-headlines?country=us".to_string(),
            news_api_key: None,
            model_base_url: "http://localhost:11434/v1".to_string(),
            model_api_key: None,
            model_name: "qwen2.5:7b-instruct".to_string(),
            cache_path: PathBuf::from("data/news_summary.json"),
            article_limit: 15,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or fall back to defaults when no
    /// path is given.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid YAML for this shape.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&text)?;
                info!(path = %path.display(), "Loaded configuration");
                Ok(config)
            }
            None => Ok(Config::default()),
        }
    }
}
