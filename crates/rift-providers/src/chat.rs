//! Minimal client for OpenAI-compatible `/chat/completions` endpoints.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for one provider.
#[derive(Debug, Clone)]
pub struct ChatConfig {
  pub base_url: String,
  pub api_key:  String,
  pub model:    String,
  pub timeout:  Duration,
}

impl ChatConfig {
  pub fn perplexity(api_key: impl Into<String>) -> Self {
    Self {
      base_url: PERPLEXITY_BASE_URL.to_owned(),
      api_key:  api_key.into(),
      model:    "sonar-pro".to_owned(),
      timeout:  Duration::from_secs(60),
    }
  }

  pub fn openai(api_key: impl Into<String>) -> Self {
    Self {
      base_url: OPENAI_BASE_URL.to_owned(),
      api_key:  api_key.into(),
      model:    "gpt-4o".to_owned(),
      timeout:  Duration::from_secs(60),
    }
  }

  pub fn with_model(mut self, model: impl Into<String>) -> Self {
    self.model = model.into();
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Message<'a> {
  pub role:    &'a str,
  pub content: &'a str,
}

impl<'a> Message<'a> {
  pub fn system(content: &'a str) -> Self {
    Self {
      role: "system",
      content,
    }
  }

  pub fn user(content: &'a str) -> Self {
    Self {
      role: "user",
      content,
    }
  }
}

/// A chat completion request body. The model is filled in by [`ChatClient`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatRequest<'a> {
  pub messages:        Vec<Message<'a>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub temperature:     Option<f32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_tokens:      Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub response_format: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct Body<'a> {
  model: &'a str,
  #[serde(flatten)]
  request: &'a ChatRequest<'a>,
}

#[derive(Deserialize)]
struct ChatResponse {
  #[serde(default)]
  choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
  message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
  content: Option<String>,
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ChatClient {
  http:   Client,
  config: ChatConfig,
}

impl ChatClient {
  pub fn new(config: ChatConfig) -> Result<Self> {
    let http = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { http, config })
  }

  pub fn model(&self) -> &str { &self.config.model }

  fn url(&self) -> String {
    format!(
      "{}/chat/completions",
      self.config.base_url.trim_end_matches('/')
    )
  }

  /// `POST /chat/completions`, returning the first choice's message content.
  pub async fn complete(&self, request: &ChatRequest<'_>) -> Result<String> {
    let body = Body {
      model: &self.config.model,
      request,
    };

    let resp = self
      .http
      .post(self.url())
      .bearer_auth(&self.config.api_key)
      .json(&body)
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(Error::Status { status, body });
    }

    let parsed: ChatResponse = resp.json().await?;
    parsed
      .choices
      .into_iter()
      .next()
      .and_then(|c| c.message.content)
      .filter(|content| !content.trim().is_empty())
      .ok_or(Error::EmptyResponse)
  }
}
