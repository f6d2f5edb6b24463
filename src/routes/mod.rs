//! Router assembly: JSON endpoints, HTML pages, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - `GET /check_api` and `POST /generate_quiz`
/// - `GET /api/v1/health`
/// - pages `/` and `/quiz` from the templates directory
/// - assets under `/static`
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let templates = &state.config.templates_dir;
    let index_page = ServeFile::new(templates.join("index.html"));
    let quiz_page = ServeFile::new(templates.join("quiz.html"));
    let static_service = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/check_api", get(http::http_check_api))
        .route("/generate_quiz", post(http::http_generate_quiz))
        .route("/api/v1/health", get(http::http_health))
        .route_service("/", index_page)
        .route_service("/quiz", quiz_page)
        .nest_service("/static", static_service)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
