//! The notice dispatch pipeline.
//!
//! One inbound request, one terminal outcome:
//!
//! ```text
//! validate → verify token → [fetch gif (best-effort)] → compose → deliver
//! ```
//!
//! The steps run strictly in order. Verification gates delivery; the GIF
//! lookup never does. Each invocation is self-contained, so concurrent
//! requests share nothing but the HTTP client and the immutable config.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::compose::{compose_body, ComposedMessage};
use crate::config::Config;
use crate::deliver::{send_message, DeliveryError};
use crate::enrich::fetch_gif;
use crate::verify::{verify_token, VerifyError};

/// Inbound notice request. Field names are fixed by the front-end contract.
#[derive(Debug, Clone, Deserialize)]
pub struct NoticeRequest {
    /// Bot-check token produced by the front-end widget
    pub token: String,
    /// Destination address
    pub email: String,
    /// Amount owed
    pub value: f64,
    /// Free-form message text
    pub text: String,
}

/// Request rejected before any downstream call was made.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("token must not be empty")]
    EmptyToken,

    #[error("email address is not well-formed")]
    BadEmail,

    #[error("value must be a non-negative number")]
    BadAmount,

    #[error("text must not be empty")]
    EmptyText,
}

/// Terminal state of one pipeline invocation.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// Request failed validation; nothing was called downstream.
    Invalid(ValidationError),
    /// Verification rejected the token or was unreachable. No delivery
    /// attempt is made; both causes collapse to the same outcome on purpose.
    Rejected,
    /// The provider accepted the message.
    Delivered,
    /// The provider refused or could not be reached.
    DeliveryFailed { detail: String },
}

/// Validate an inbound request before touching any downstream service.
pub fn validate(request: &NoticeRequest) -> Result<(), ValidationError> {
    if request.token.trim().is_empty() {
        return Err(ValidationError::EmptyToken);
    }
    if !is_plausible_address(&request.email) {
        return Err(ValidationError::BadEmail);
    }
    if !request.value.is_finite() || request.value < 0.0 {
        return Err(ValidationError::BadAmount);
    }
    if request.text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(())
}

/// Minimal address check: one `@`, non-empty parts, no whitespace.
/// Anything stricter is left to the delivery provider.
fn is_plausible_address(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}

/// Run the full pipeline for one request.
///
/// Always returns an outcome; no failure below escapes as an error.
pub async fn dispatch(client: &Client, config: &Config, request: &NoticeRequest) -> DispatchOutcome {
    info!(
        to = %request.email,
        value = request.value,
        text_length = request.text.len(),
        "dispatch_received"
    );

    if let Err(e) = validate(request) {
        warn!(reason = %e, "dispatch_invalid_request");
        return DispatchOutcome::Invalid(e);
    }

    // Step 1: verification. Infrastructure failure and policy rejection are
    // distinct errors but map to the same outcome, by a single policy match.
    match verify_token(client, config, &request.token).await {
        Ok(()) => {}
        Err(VerifyError::Unavailable(reason)) => {
            warn!(reason = %reason, "dispatch_verify_unavailable");
            return DispatchOutcome::Rejected;
        }
        Err(VerifyError::Rejected { error_codes }) => {
            warn!(error_codes = ?error_codes, "dispatch_verify_rejected");
            return DispatchOutcome::Rejected;
        }
    }

    // Step 2: enrichment, best-effort. A failed lookup only drops the image.
    let gif = match fetch_gif(client, config).await {
        Ok(gif) => Some(gif),
        Err(e) => {
            warn!(error = %e, "dispatch_gif_fetch_failed");
            None
        }
    };

    // Step 3: composition.
    let message = ComposedMessage {
        from: config.from_email.clone(),
        to: request.email.clone(),
        subject: config.subject.clone(),
        html: compose_body(
            &request.text,
            request.value,
            &config.currency_symbol,
            gif.as_ref(),
        ),
    };

    // Step 4: delivery.
    match send_message(client, config, &message).await {
        Ok(receipt) => {
            info!(to = %message.to, provider_id = %receipt.id, "dispatch_delivered");
            DispatchOutcome::Delivered
        }
        Err(DeliveryError::Provider { status, body }) => {
            warn!(status_code = status, "dispatch_delivery_refused");
            DispatchOutcome::DeliveryFailed { detail: body }
        }
        Err(DeliveryError::Request(e)) => {
            warn!(error = %e, "dispatch_delivery_unreachable");
            DispatchOutcome::DeliveryFailed {
                detail: e.to_string(),
            }
        }
    }
}
