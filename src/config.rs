//! Runtime configuration: environment variables plus an optional TOML file
//! with prompt overrides.
//!
//! See `AppConfig::from_env` for the variables that are read.

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{error, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Clone, Debug)]
pub struct AppConfig {
  pub gemini: GeminiConfig,
  pub prompts: Prompts,
  pub addr: SocketAddr,
  pub static_dir: PathBuf,
  pub templates_dir: PathBuf,
}

/// Upstream connection settings. `api_key` stays `None` when the credential
/// is not configured; every upstream operation then reports it per call.
#[derive(Clone, Debug)]
pub struct GeminiConfig {
  pub api_key: Option<String>,
  pub base_url: String,
  pub model: String,
  pub timeout: Option<Duration>,
}

impl Default for GeminiConfig {
  fn default() -> Self {
    Self {
      api_key: None,
      base_url: DEFAULT_BASE_URL.into(),
      model: DEFAULT_MODEL.into(),
      timeout: None,
    }
  }
}

/// TOML file layout for `QUIZGEN_CONFIG_PATH`.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct FileConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Prompts sent upstream. Placeholders in `quiz_template`:
/// `{num_questions}`, `{question_type}`, `{topic}`, `{difficulty}`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub probe: String,
  pub quiz_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      probe: "Say 'Hello' in a JSON response.".into(),
      quiz_template: "Generate {num_questions} {question_type} quiz questions on {topic} with {difficulty} difficulty. Format the output in JSON with 'question', 'options', and 'answer' fields.".into(),
    }
  }
}

impl AppConfig {
  /// Build configuration from the process environment.
  ///
  ///   GEMINI_API_KEY       : upstream credential (optional)
  ///   GEMINI_BASE_URL      : default "https://generativelanguage.googleapis.com/v1beta"
  ///   GEMINI_MODEL         : default "gemini-1.5-flash"
  ///   GEMINI_TIMEOUT_SECS  : per-request timeout, unset = client default
  ///   PORT                 : u16 (default 5000)
  ///   STATIC_DIR           : default "./static"
  ///   TEMPLATES_DIR        : default "./templates"
  ///   QUIZGEN_CONFIG_PATH  : TOML file with prompt overrides
  pub fn from_env() -> Self {
    Self::from_lookup(|name| std::env::var(name).ok())
  }

  pub(crate) fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
    let api_key = var("GEMINI_API_KEY")
      .map(|k| k.trim().to_string())
      .filter(|k| !k.is_empty());

    let timeout = var("GEMINI_TIMEOUT_SECS").and_then(|s| match s.trim().parse::<u64>() {
      Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
      _ => {
        warn!(target: "quizgen_backend", value = %s, "Ignoring invalid GEMINI_TIMEOUT_SECS");
        None
      }
    });

    let gemini = GeminiConfig {
      api_key,
      base_url: var("GEMINI_BASE_URL")
        .map(|u| u.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_BASE_URL.into()),
      model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
      timeout,
    };

    let port = var("PORT")
      .and_then(|p| p.parse::<u16>().ok())
      .unwrap_or(DEFAULT_PORT);

    let prompts = var("QUIZGEN_CONFIG_PATH")
      .and_then(|path| load_file_config(&path))
      .map(|cfg| cfg.prompts)
      .unwrap_or_default();

    Self {
      gemini,
      prompts,
      addr: SocketAddr::from(([0, 0, 0, 0], port)),
      static_dir: var("STATIC_DIR").unwrap_or_else(|| "./static".into()).into(),
      templates_dir: var("TEMPLATES_DIR").unwrap_or_else(|| "./templates".into()).into(),
    }
  }
}

/// Attempt to load `FileConfig` from `path`. On any parsing/IO error, returns None.
pub fn load_file_config(path: &str) -> Option<FileConfig> {
  match std::fs::read_to_string(path) {
    Ok(s) => match toml::from_str::<FileConfig>(&s) {
      Ok(cfg) => {
        info!(target: "quizgen_backend", %path, "Loaded prompt config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "quizgen_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "quizgen_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> =
      pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name: &str| map.get(name).cloned()
  }

  #[test]
  fn defaults_without_environment() {
    let cfg = AppConfig::from_lookup(lookup(&[]));
    assert!(cfg.gemini.api_key.is_none());
    assert_eq!(cfg.gemini.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.gemini.model, DEFAULT_MODEL);
    assert!(cfg.gemini.timeout.is_none());
    assert_eq!(cfg.addr.port(), 5000);
    assert_eq!(cfg.static_dir, PathBuf::from("./static"));
    assert_eq!(cfg.prompts.probe, "Say 'Hello' in a JSON response.");
  }

  #[test]
  fn blank_key_counts_as_missing() {
    let cfg = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "   ")]));
    assert!(cfg.gemini.api_key.is_none());
  }

  #[test]
  fn reads_overrides() {
    let cfg = AppConfig::from_lookup(lookup(&[
      ("GEMINI_API_KEY", "k-123"),
      ("GEMINI_BASE_URL", "http://127.0.0.1:9999/v1beta/"),
      ("GEMINI_MODEL", "gemini-2.0-flash"),
      ("GEMINI_TIMEOUT_SECS", "15"),
      ("PORT", "8080"),
    ]));
    assert_eq!(cfg.gemini.api_key.as_deref(), Some("k-123"));
    assert_eq!(cfg.gemini.base_url, "http://127.0.0.1:9999/v1beta");
    assert_eq!(cfg.gemini.model, "gemini-2.0-flash");
    assert_eq!(cfg.gemini.timeout, Some(Duration::from_secs(15)));
    assert_eq!(cfg.addr.port(), 8080);
  }

  #[test]
  fn bad_port_and_timeout_fall_back() {
    let cfg = AppConfig::from_lookup(lookup(&[("PORT", "http"), ("GEMINI_TIMEOUT_SECS", "0")]));
    assert_eq!(cfg.addr.port(), DEFAULT_PORT);
    assert!(cfg.gemini.timeout.is_none());
  }

  #[test]
  fn toml_overrides_only_given_prompts() {
    let cfg: FileConfig = toml::from_str("[prompts]\nprobe = \"ping\"\n").unwrap();
    assert_eq!(cfg.prompts.probe, "ping");
    assert_eq!(cfg.prompts.quiz_template, Prompts::default().quiz_template);
  }

  #[test]
  fn unreadable_file_yields_none() {
    assert!(load_file_config("/definitely/not/here.toml").is_none());
  }
}
