//! Minimal client for an OpenAI-compatible `/chat/completions` endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;

/// Longest error body kept in [`GeneratorError::Api`].
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_owned(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_owned(),
            content: content.into(),
        }
    }
}

/// One completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions client with bearer authentication.
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .finish_non_exhaustive()
    }
}

impl ChatClient {
    /// `base_url` is the API root, e.g. `https://api.openai.com/v1`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`GeneratorError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("socialweb/0.1 (site-generator)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join("chat/completions"))
            .map_err(|e| GeneratorError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// Sends `request` and returns the first choice's message content.
    ///
    /// # Errors
    ///
    /// - [`GeneratorError::Http`] on network failure.
    /// - [`GeneratorError::Api`] on a non-2xx status.
    /// - [`GeneratorError::Deserialize`] if the body is not a completion.
    /// - [`GeneratorError::EmptyCompletion`] if no content came back.
    pub async fn complete(&self, request: &ChatRequest) -> Result<String, GeneratorError> {
        let mut builder = self.client.post(self.endpoint.clone());
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.json(request).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let mut body = text;
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|&i| body.is_char_boundary(i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text).map_err(GeneratorError::Deserialize)?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(GeneratorError::EmptyCompletion)
    }
}
