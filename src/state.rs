//! Application state shared by all handlers. Read-only after startup.
//!
//! This module owns:
//!   - the loaded configuration (prompts, paths, upstream settings)
//!   - the optional Gemini client (present only when a credential is set)

use tracing::{info, instrument, warn};

use crate::config::{AppConfig, Prompts};
use crate::gemini::Gemini;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub gemini: Option<Gemini>,
}

impl AppState {
    /// Build state from a configuration. Fails only if the HTTP client cannot be built.
    #[instrument(level = "info", skip_all)]
    pub fn new(config: AppConfig) -> Result<Self, reqwest::Error> {
        let gemini = Gemini::from_config(&config.gemini)?;
        if let Some(g) = &gemini {
            info!(target: "quizgen_backend", base_url = %g.base_url, model = %g.model, "Gemini enabled.");
        } else {
            warn!(target: "quizgen_backend", "GEMINI_API_KEY not found. Quiz generation will report a missing credential.");
        }
        Ok(Self { config, gemini })
    }

    pub fn prompts(&self) -> &Prompts {
        &self.config.prompts
    }
}
