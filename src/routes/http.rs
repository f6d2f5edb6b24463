//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.

use std::sync::Arc;
use axum::{extract::{rejection::JsonRejection, State}, Json, response::IntoResponse};
use tracing::{info, instrument, warn};

use crate::error::ServiceError;
use crate::key_check::check_credential;
use crate::protocol::*;
use crate::quiz::generate_quiz;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_check_api(
  State(state): State<Arc<AppState>>,
) -> Result<Json<KeyCheckOut>, ServiceError> {
  let msg = check_credential(state.gemini.as_ref(), state.prompts()).await?;
  Ok(Json(KeyCheckOut { success: msg.into() }))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_generate_quiz(
  State(state): State<Arc<AppState>>,
  body: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizOut>, ServiceError> {
  let Json(req) = body.map_err(|e| {
    warn!(target: "quizgen_backend", error = %e.body_text(), "Rejected quiz request body");
    ServiceError::InvalidRequest(e.body_text())
  })?;

  let quiz = generate_quiz(state.gemini.as_ref(), state.prompts(), &req).await?;
  info!(target: "quizgen_backend", topic = %req.topic, num_questions = req.num_questions, "HTTP quiz served");
  Ok(Json(QuizOut { quiz }))
}
