//! Axum router configuration with middleware.
//!
//! Chat endpoints live under `/api/`; `/health` and the plain-text
//! index sit at the root. Middleware: permissive CORS, request tracing,
//! and panic catching (a panicking handler becomes a generic 500, never
//! a dropped connection).

use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::error::AppError;
use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/clear", post(handlers::chat::clear))
        .route("/info", get(handlers::info::info));

    Router::new()
        .route("/", get(index))
        .route("/health", get(handlers::health::health))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Map a handler panic into the generic 500 envelope instead of tearing
/// down the connection. The relay itself never commits partial state on
/// a panicking request; by the time a response is produced the rollback
/// guard has already run.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected server error".to_string()
    };
    tracing::error!(detail = %detail, "request handler panicked");
    AppError::Internal(detail).into_response()
}

/// GET / -- plain-text endpoint listing.
async fn index() -> &'static str {
    "Llamalink Chat Relay\n\
     \n\
     Endpoints:\n\
     - GET  /health     - backend reachability\n\
     - POST /api/chat   - send a message (session via X-Session-ID header)\n\
     - POST /api/clear  - clear the session's conversation history\n\
     - GET  /api/info   - service information\n"
}
