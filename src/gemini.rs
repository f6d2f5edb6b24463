//! Minimal Gemini `generateContent` client.
//!
//! One POST per call, no retries. The credential travels as the `key` query
//! parameter. Calls are instrumented and log model name, status, latency and
//! response sizes.
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::GeminiConfig;
use crate::util::trunc_for_log;

#[derive(Clone)]
pub struct Gemini {
  pub client: reqwest::Client,
  api_key: String,
  pub base_url: String,
  pub model: String,
}

impl std::fmt::Debug for Gemini {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Gemini")
      .field("base_url", &self.base_url)
      .field("model", &self.model)
      .finish_non_exhaustive()
  }
}

/// Raw upstream answer: status plus the untouched body text.
#[derive(Debug)]
pub struct UpstreamReply {
  pub status: StatusCode,
  pub body: String,
}

impl Gemini {
  /// Construct the client if a credential is configured; otherwise return None.
  pub fn from_config(cfg: &GeminiConfig) -> Result<Option<Self>, reqwest::Error> {
    let Some(api_key) = cfg.api_key.clone() else {
      return Ok(None);
    };

    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = cfg.timeout {
      builder = builder.timeout(timeout);
    }
    // Loopback upstreams (local mocks, sidecars) skip any system proxy.
    if is_loopback(&cfg.base_url) {
      builder = builder.no_proxy();
    }
    let client = builder.build()?;

    Ok(Some(Self {
      client,
      api_key,
      base_url: cfg.base_url.clone(),
      model: cfg.model.clone(),
    }))
  }

  pub fn endpoint(&self) -> String {
    format!("{}/models/{}:generateContent", self.base_url, self.model)
  }

  /// Send a single text prompt. Any HTTP status is returned to the caller;
  /// only transport failures become errors here. Errors are stripped of the
  /// request URL since it carries the key.
  #[instrument(level = "info", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
  pub async fn generate(&self, prompt: &str) -> Result<UpstreamReply, reqwest::Error> {
    let req = GenerateContentRequest::from_prompt(prompt);
    let start = std::time::Instant::now();

    let res = self
      .client
      .post(self.endpoint())
      .query(&[("key", self.api_key.as_str())])
      .header(USER_AGENT, "quizgen-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .json(&req)
      .send()
      .await
      .map_err(reqwest::Error::without_url)?;

    let status = res.status();
    let body = res.text().await.map_err(reqwest::Error::without_url)?;
    let elapsed = start.elapsed();
    info!(%status, ?elapsed, body_len = body.len(), "Gemini response received");
    debug!(body = %trunc_for_log(&body, 2000), "Gemini response body");

    Ok(UpstreamReply { status, body })
  }
}

fn is_loopback(base_url: &str) -> bool {
  reqwest::Url::parse(base_url)
    .ok()
    .and_then(|u| u.host_str().map(|h| matches!(h, "localhost" | "127.0.0.1" | "[::1]")))
    .unwrap_or(false)
}

// --- generateContent DTOs ---

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
  pub contents: Vec<Content>,
}

impl GenerateContentRequest {
  pub fn from_prompt(prompt: &str) -> Self {
    Self {
      contents: vec![Content { parts: vec![Part { text: Some(prompt.to_string()) }] }],
    }
  }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Content {
  #[serde(default)]
  pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Part {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
  #[serde(default)]
  pub candidates: Vec<Candidate>,
  #[serde(default)]
  pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Candidate {
  #[serde(default)]
  pub content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
  #[serde(default)]
  pub prompt_token_count: Option<u32>,
  #[serde(default)]
  pub candidates_token_count: Option<u32>,
  #[serde(default)]
  pub total_token_count: Option<u32>,
}

impl GenerateContentResponse {
  /// Text of the first part of the first candidate. Missing pieces read as "".
  pub fn first_text(&self) -> &str {
    self
      .candidates
      .first()
      .and_then(|c| c.content.as_ref())
      .and_then(|c| c.parts.first())
      .and_then(|p| p.text.as_deref())
      .unwrap_or_default()
  }

  pub fn log_usage(&self) {
    if let Some(usage) = &self.usage_metadata {
      info!(
        prompt_tokens = ?usage.prompt_token_count,
        candidates_tokens = ?usage.candidates_token_count,
        total_tokens = ?usage.total_token_count,
        "Gemini usage"
      );
    }
  }
}
