// src/chat/client.rs
//! Chat-completion transport: the trait the dispatcher talks to and the
//! reqwest implementation for the xAI endpoint.

use async_trait::async_trait;
use color_eyre::eyre::{bail, eyre};
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ChatConfig;

const COMPLETIONS_PATH: &str = "/chat/completions";

/// Sends a `system` instruction plus one `user` prompt and returns the reply text.
///
/// Implementations own transport and wire-format details so the dispatcher can
/// be driven by a fake in tests.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: [ApiMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for an OpenAI-style `/chat/completions` endpoint (xAI by default).
pub struct XaiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// base + COMPLETIONS_PATH
    url: String,
}

impl XaiClient {
    pub fn new(config: &ChatConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            url: format!("{}{}", config.base_url.trim_end_matches('/'), COMPLETIONS_PATH),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CompletionClient for XaiClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let payload = build_request(&self.model, system, user);

        debug!("POST {} ({} chars of user text)", self.url, user.len());
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("completion endpoint returned {}", status);
            bail!("Error code: {} - {}", status.as_u16(), describe_error_body(&body));
        }

        parse_reply(&body)
    }
}

fn build_request<'a>(model: &'a str, system: &'a str, user: &'a str) -> ApiRequest<'a> {
    ApiRequest {
        model,
        messages: [
            ApiMessage { role: "system", content: system },
            ApiMessage { role: "user", content: user },
        ],
    }
}

/// Pulls the first choice's content out of a successful response body.
fn parse_reply(body: &str) -> Result<String> {
    let response: ApiResponse = serde_json::from_str(body)
        .map_err(|e| eyre!("malformed completion response: {}", e))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| eyre!("response contained no choices"))?;

    choice
        .message
        .content
        .ok_or_else(|| eyre!("response choice had no content"))
}

/// Providers disagree on error shape: `{"error": {"message": ..}}` or
/// `{"error": ".."}`. Falls back to the raw body.
fn describe_error_body(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let message = parsed.as_ref().and_then(|v| {
        let error = v.get("error")?;
        error
            .get("message")
            .and_then(|m| m.as_str())
            .or_else(|| error.as_str())
            .map(str::to_string)
    });

    match message {
        Some(message) => message,
        None if body.trim().is_empty() => "empty response body".to_string(),
        None => body.trim().to_string(),
    }
}
