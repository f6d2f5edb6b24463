//! Quizgen · AI quiz generator backend
//!
//! - Axum HTTP API: credential check + quiz generation via Google Gemini
//! - Serves the two HTML pages (./templates) and assets (./static)
//!
//! Important env variables (a `.env` file is honored):
//!   PORT                 : u16 (default 5000)
//!   GEMINI_API_KEY       : upstream credential; without it every call reports a missing key
//!   GEMINI_BASE_URL      : default "https://generativelanguage.googleapis.com/v1beta"
//!   GEMINI_MODEL         : default "gemini-1.5-flash"
//!   GEMINI_TIMEOUT_SECS  : optional per-request timeout
//!   QUIZGEN_CONFIG_PATH  : path to TOML config (prompt overrides)
//!   LOG_LEVEL            : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT           : "pretty" (default) or "json"

mod config;
mod error;
mod gemini;
mod key_check;
mod protocol;
mod quiz;
mod routes;
mod state;
mod telemetry;
mod util;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::AppConfig;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  let dotenv_loaded = dotenv::dotenv().is_ok();
  telemetry::init_tracing();
  if dotenv_loaded {
    info!(target: "quizgen_backend", "Loaded variables from .env");
  }

  let config = AppConfig::from_env();
  let addr = config.addr;
  let state = Arc::new(AppState::new(config)?);

  let app = build_router(state);

  let listener = TcpListener::bind(addr).await?;
  info!(target: "quizgen_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "quizgen_backend", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(target: "quizgen_backend", error = %e, "Failed to listen for Ctrl-C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        tracing::error!(target: "quizgen_backend", error = %e, "Failed to listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }
  info!(target: "quizgen_backend", "Shutdown signal received");
}
