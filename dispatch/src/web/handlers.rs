//! HTTP endpoint handlers.
//!
//! The notice handler is a thin wrapper over the dispatch pipeline: it owns
//! nothing but the status-code mapping. Every exit path produces a JSON body.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use crate::dispatch::{dispatch, DispatchOutcome, NoticeRequest};
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
}

impl AppState {
    pub fn new(config: Config, http: Client) -> Self {
        Self {
            config: Arc::new(config),
            http,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Notice Dispatch
// =============================================================================

/// Response body for the notice endpoint.
#[derive(Serialize)]
pub struct NoticeResponse {
    pub status: &'static str,
    pub message: String,
    /// Provider error content, present only when delivery failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

const SENT_MESSAGE: &str = "Notice sent. Go collect what's yours!";
const REJECTED_MESSAGE: &str = "Bot verification failed. This smells like spam.";
const DELIVERY_FAILED_MESSAGE: &str = "The notice could not be delivered.";

/// Notice dispatch endpoint.
///
/// Runs the whole pipeline and maps its terminal state onto the HTTP
/// contract: 200 delivered, 400 invalid, 401 rejected, 403 delivery failed.
pub async fn send_notice(
    State(state): State<AppState>,
    Json(request): Json<NoticeRequest>,
) -> impl IntoResponse {
    info!(to = %request.email, "notice_request_received");

    let outcome = dispatch(&state.http, &state.config, &request).await;

    match outcome {
        DispatchOutcome::Invalid(e) => (
            StatusCode::BAD_REQUEST,
            Json(NoticeResponse {
                status: "invalid",
                message: e.to_string(),
                detail: None,
            }),
        ),
        DispatchOutcome::Rejected => (
            StatusCode::UNAUTHORIZED,
            Json(NoticeResponse {
                status: "rejected",
                message: REJECTED_MESSAGE.to_string(),
                detail: None,
            }),
        ),
        DispatchOutcome::Delivered => (
            StatusCode::OK,
            Json(NoticeResponse {
                status: "sent",
                message: SENT_MESSAGE.to_string(),
                detail: None,
            }),
        ),
        // 403 preserved from the original public contract; the provider's
        // error content rides along in `detail` and is also logged upstream.
        DispatchOutcome::DeliveryFailed { detail } => (
            StatusCode::FORBIDDEN,
            Json(NoticeResponse {
                status: "delivery_failed",
                message: DELIVERY_FAILED_MESSAGE.to_string(),
                detail: Some(detail),
            }),
        ),
    }
}
