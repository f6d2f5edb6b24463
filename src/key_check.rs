//! Credential probe: one throwaway prompt to confirm the upstream accepts the key.

use reqwest::StatusCode;
use tracing::{info, instrument, warn};

use crate::config::Prompts;
use crate::error::ServiceError;
use crate::gemini::Gemini;

pub const KEY_VALID: &str = "API key is valid.";

#[instrument(level = "info", skip_all, fields(configured = gemini.is_some()))]
pub async fn check_credential(gemini: Option<&Gemini>, prompts: &Prompts) -> Result<&'static str, ServiceError> {
  let gemini = gemini.ok_or(ServiceError::MissingCredential)?;

  let reply = gemini.generate(&prompts.probe).await?;
  if reply.status == StatusCode::OK {
    info!(target: "quizgen_backend", "API key accepted");
    Ok(KEY_VALID)
  } else {
    warn!(target: "quizgen_backend", status = %reply.status, "API key rejected");
    Err(ServiceError::KeyRejected { status: reply.status.as_u16(), body: reply.body })
  }
}
