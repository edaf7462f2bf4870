//! Message delivery through the Mailgun messages API.
//!
//! One form-encoded POST per notice, authenticated with HTTP basic auth
//! (`api:{key}`). Delivery is the last pipeline step and the only one whose
//! failure surfaces to the caller with the provider's error content.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::compose::ComposedMessage;
use crate::config::Config;

/// Provider acknowledgement for an accepted message.
#[derive(Debug, Deserialize)]
pub struct DeliveryReceipt {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub message: String,
}

/// Why delivery failed.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The provider could not be reached at all.
    #[error("delivery request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("delivery provider returned status {status}: {body}")]
    Provider { status: u16, body: String },
}

/// Send a composed message. Called at most once per inbound request.
pub async fn send_message(
    client: &Client,
    config: &Config,
    message: &ComposedMessage,
) -> Result<DeliveryReceipt, DeliveryError> {
    let url = format!("{}/{}/messages", config.mailgun_base_url, config.mailgun_domain);

    let response = client
        .post(&url)
        .basic_auth("api", Some(&config.mailgun_api_key))
        .form(&[
            ("from", message.from.as_str()),
            ("to", message.to.as_str()),
            ("subject", message.subject.as_str()),
            ("html", message.html.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(
            status_code = status.as_u16(),
            provider_body = %body,
            to = %message.to,
            "delivery_provider_error"
        );
        return Err(DeliveryError::Provider {
            status: status.as_u16(),
            body,
        });
    }

    let receipt: DeliveryReceipt = response.json().await.unwrap_or(DeliveryReceipt {
        id: String::new(),
        message: String::new(),
    });

    info!(
        to = %message.to,
        provider_id = %receipt.id,
        "delivery_accepted"
    );

    Ok(receipt)
}
