//! Quiz generation: prompt building, the upstream call, and extraction of the
//! JSON payload embedded in the model's free-text answer.

use reqwest::StatusCode;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::config::Prompts;
use crate::error::ServiceError;
use crate::gemini::{Gemini, GenerateContentResponse};
use crate::protocol::QuizRequest;
use crate::util::{fill_template, strip_code_fence};

pub fn build_prompt(prompts: &Prompts, req: &QuizRequest) -> String {
  let count = req.num_questions.to_string();
  fill_template(
    &prompts.quiz_template,
    &[
      ("num_questions", count.as_str()),
      ("question_type", req.question_type.as_str()),
      ("topic", req.topic.as_str()),
      ("difficulty", req.difficulty.as_str()),
    ],
  )
}

#[instrument(
  level = "info",
  skip_all,
  fields(topic = %req.topic, difficulty = %req.difficulty, num_questions = req.num_questions, question_type = %req.question_type)
)]
pub async fn generate_quiz(gemini: Option<&Gemini>, prompts: &Prompts, req: &QuizRequest) -> Result<Value, ServiceError> {
  let gemini = gemini.ok_or(ServiceError::MissingCredential)?;

  let prompt = build_prompt(prompts, req);
  let reply = gemini.generate(&prompt).await?;

  if reply.status != StatusCode::OK {
    error!(target: "quizgen_backend", status = %reply.status, "Upstream refused quiz generation");
    return Err(ServiceError::UpstreamStatus { status: reply.status.as_u16(), body: reply.body });
  }

  let envelope: GenerateContentResponse = serde_json::from_str(&reply.body).map_err(|e| {
    warn!(target: "quizgen_backend", error = %e, "Upstream envelope is not valid JSON");
    ServiceError::MalformedModelJson(e)
  })?;
  envelope.log_usage();

  let quiz = parse_quiz_text(envelope.first_text())?;
  info!(target: "quizgen_backend", kind = value_kind(&quiz), "Quiz generated");
  Ok(quiz)
}

/// Turn the model's text into JSON: reject empty output, drop a markdown fence, decode.
pub fn parse_quiz_text(text: &str) -> Result<Value, ServiceError> {
  let unfenced = strip_code_fence(text);
  if unfenced.is_empty() {
    warn!(target: "quizgen_backend", "Model returned empty text");
    return Err(ServiceError::EmptyModelOutput);
  }

  serde_json::from_str(unfenced).map_err(|e| {
    warn!(target: "quizgen_backend", error = %e, "Model text is not valid JSON");
    ServiceError::MalformedModelJson(e)
  })
}

fn value_kind(v: &Value) -> &'static str {
  match v {
    Value::Array(_) => "array",
    Value::Object(_) => "object",
    _ => "scalar",
  }
}
