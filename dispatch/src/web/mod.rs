//! Web server module.
//!
//! Exposes the notice dispatch endpoint and a health check, with the CORS
//! policy the front-end relies on applied to every response.

pub mod handlers;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::{Any, CorsLayer}, trace::TraceLayer};

pub use handlers::{health, send_notice, AppState, HealthResponse, NoticeResponse};

/// Build the application router with CORS and request tracing applied.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::OPTIONS, Method::POST, Method::GET])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route("/api/notices", post(send_notice))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
