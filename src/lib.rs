pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;
pub mod storage;

#[cfg(test)]
pub mod testing;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Environment;
use crate::handlers::{attachments, plans, system, uploads};
use crate::state::AppState;

/// Build the full router over `state`.
pub fn app(state: AppState, environment: Environment) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        // Resources
        .route("/plans", get(plans::list).post(plans::create))
        .route("/attachments", get(attachments::list).post(attachments::create))
        // Stored documents
        .route("/uploads/", get(uploads::empty_path))
        .route("/uploads/*path", get(uploads::serve_upload))
        .route("/session-documents/", get(uploads::empty_path))
        .route("/session-documents/*path", get(uploads::serve_session_document))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    // Production pages are served from the same loopback origin.
    match environment {
        Environment::Development => router.layer(CorsLayer::permissive()),
        Environment::Production => router,
    }
}
