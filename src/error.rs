//! Error kinds produced while validating the credential or generating a quiz.
//!
//! None of these are fatal: every variant is rendered at the HTTP boundary as
//! `{"error": ..., "details": ...}` JSON.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;

use crate::protocol::ErrorOut;

#[derive(Error, Debug)]
pub enum ServiceError {
  #[error("API key is missing. Please set the GEMINI_API_KEY environment variable.")]
  MissingCredential,

  #[error("Invalid API key. Status Code: {status}")]
  KeyRejected { status: u16, body: String },

  #[error("Failed to generate quiz")]
  UpstreamStatus { status: u16, body: String },

  #[error("AI returned an empty response")]
  EmptyModelOutput,

  #[error("Invalid AI response format")]
  MalformedModelJson(#[source] serde_json::Error),

  #[error("Failed to reach the AI service")]
  Transport(#[from] reqwest::Error),

  #[error("Invalid request body")]
  InvalidRequest(String),
}

impl ServiceError {
  pub fn status_code(&self) -> StatusCode {
    match self {
      ServiceError::MissingCredential => StatusCode::SERVICE_UNAVAILABLE,
      ServiceError::KeyRejected { .. } => StatusCode::UNAUTHORIZED,
      ServiceError::UpstreamStatus { .. }
      | ServiceError::EmptyModelOutput
      | ServiceError::MalformedModelJson(_)
      | ServiceError::Transport(_) => StatusCode::BAD_GATEWAY,
      ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
    }
  }

  /// Extra context for the client. Upstream bodies are passed through verbatim.
  pub fn details(&self) -> Option<String> {
    match self {
      ServiceError::KeyRejected { body, .. } | ServiceError::UpstreamStatus { body, .. } => Some(body.clone()),
      ServiceError::MalformedModelJson(e) => Some(e.to_string()),
      ServiceError::Transport(e) => Some(e.to_string()),
      ServiceError::InvalidRequest(msg) => Some(msg.clone()),
      ServiceError::MissingCredential | ServiceError::EmptyModelOutput => None,
    }
  }

  pub fn to_out(&self) -> ErrorOut {
    ErrorOut { error: self.to_string(), details: self.details() }
  }
}

impl IntoResponse for ServiceError {
  fn into_response(self) -> Response {
    (self.status_code(), Json(self.to_out())).into_response()
  }
}
