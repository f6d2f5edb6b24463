//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

pub const DEFAULT_TOPIC: &str = "General Knowledge";
pub const DEFAULT_DIFFICULTY: &str = "Medium";
pub const DEFAULT_NUM_QUESTIONS: u32 = 5;
pub const DEFAULT_QUESTION_TYPE: &str = "multiple_choice";

/// Body of `POST /generate_quiz`. Every field is optional on the wire.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct QuizRequest {
    #[serde(default = "default_topic")]
    pub topic: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_num_questions", deserialize_with = "positive_count")]
    pub num_questions: u32,
    #[serde(default = "default_question_type")]
    pub question_type: String,
}

impl Default for QuizRequest {
    fn default() -> Self {
        Self {
            topic: default_topic(),
            difficulty: default_difficulty(),
            num_questions: default_num_questions(),
            question_type: default_question_type(),
        }
    }
}

fn default_topic() -> String {
    DEFAULT_TOPIC.into()
}
fn default_difficulty() -> String {
    DEFAULT_DIFFICULTY.into()
}
fn default_num_questions() -> u32 {
    DEFAULT_NUM_QUESTIONS
}
fn default_question_type() -> String {
    DEFAULT_QUESTION_TYPE.into()
}

/// Accept `7`, `7.0` and `"7"`; reject zero, negatives, fractions and non-numbers.
fn positive_count<'de, D: Deserializer<'de>>(de: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Int(i64),
        Float(f64),
        Text(String),
    }

    let raw = match Count::deserialize(de)? {
        Count::Int(n) => n,
        Count::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => f as i64,
        Count::Float(f) => {
            return Err(D::Error::custom(format!("num_questions must be a whole number, got {f}")))
        }
        Count::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("num_questions must be an integer, got {s:?}")))?,
    };
    match u32::try_from(raw) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(D::Error::custom(format!(
            "num_questions must be a positive integer, got {raw}"
        ))),
    }
}

#[derive(Debug, Serialize)]
pub struct QuizOut {
    pub quiz: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct KeyCheckOut {
    pub success: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
