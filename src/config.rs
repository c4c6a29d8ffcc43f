// src/config.rs

//! Connection settings for the completion endpoint.
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://api.x.ai/v1";
pub const DEFAULT_MODEL: &str = "grok-2-1212";
pub const API_KEY_VAR: &str = "XAI_API_KEY";
pub const SYSTEM_PROMPT: &str = "You are an expert in Indian culture, traditions, and heritage.";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Everything the completion client needs, built once at startup and passed in.
#[derive(Clone)]
pub struct ChatConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub system_prompt: String,
    pub request_timeout: Duration,
}

impl ChatConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    /// Reads the API key from `XAI_API_KEY`. A missing key is not an error here;
    /// the first request fails instead and the failure lands in the transcript.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_VAR).unwrap_or_default();
        if api_key.trim().is_empty() {
            warn!("{} is not set, requests will fail until it is provided", API_KEY_VAR);
        }
        Self::new(api_key)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

// Keep the key out of debug output and logs.
impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_key", &if self.has_api_key() { "<set>" } else { "<missing>" })
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
