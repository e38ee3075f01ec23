//! Axum router configuration with middleware.
//!
//! Routes:
//! - POST /api/chat
//! - GET  /api/session
//! - POST /api/session/clear
//! - GET  /health
//!
//! Every response carries permissive CORS headers, and `CorsLayer` answers
//! any OPTIONS request as a preflight. Unmatched paths and methods get a
//! 404 `{error}` body, and a panicking handler gets a 500 `{error}` body.

use std::any::Any;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::error::AppError;
use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    with_middleware(routes().with_state(state))
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/chat", post(handlers::chat::chat))
        .route("/api/session", get(handlers::session::get_history))
        .route("/api/session/clear", post(handlers::session::clear_history))
        .route("/health", get(health_check))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
}

/// Panic recovery is the innermost layer; its 500s pass through CORS.
fn with_middleware(router: Router) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any);

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}

async fn not_found() -> AppError {
    AppError::NotFound
}

/// GET /health - Liveness plus the configured backends.
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "store": state.store.kind(),
        "provider": state.chat_service.provider_name(),
        "activeSessions": state.chat_service.active_sessions(),
    }))
}
