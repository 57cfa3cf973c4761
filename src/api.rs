//! The language-model collaborator seam.
//!
//! The pipeline only needs one operation from a model: complete text given a
//! structured prompt. That operation is the [`CompleteAsync`] trait, so the
//! summarizer can run against the real [`ChatClient`] in production and
//! against an in-process fake in tests.
//!
//! [`ChatClient`] speaks the OpenAI-compatible chat-completions protocol,
//! which covers hosted APIs and local runtimes (Ollama, llama.cpp) alike.
//! There is deliberately no retry logic here: a failed completion marks one
//! article as failed, and retry policy belongs to whoever triggers the next
//! refresh.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::error::{Error, Result};

/// A fixed two-part prompt: a system instruction and a user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Async text completion against a language model.
pub trait CompleteAsync {
    /// Send a structured prompt to the model and return its text output.
    async fn complete(&self, prompt: &Prompt) -> Result<String>;
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl ChatClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, model: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.into(),
        }
    }
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

impl CompleteAsync for ChatClient {
    #[instrument(level = "info", skip_all, fields(model = %self.model))]
    async fn complete(&self, prompt: &Prompt) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompt.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.user.clone(),
                },
            ],
        };

        let t0 = Instant::now();
        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {key}"));
        }

        let response = builder
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Completion(e.to_string()))?
            .json::<ChatResponse>()
            .await
            .map_err(|e| Error::Completion(e.to_string()))?;

        let dt = t0.elapsed();
        match response.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content),
            None => {
                warn!(elapsed_ms = dt.as_millis() as u64, "Model returned no choices");
                Err(Error::Completion("response contained no choices".to_string()))
            }
        }
    }
}
