//! Best-effort GIF lookup for message enrichment.
//!
//! Fetches a themed random GIF to decorate the notice. Every failure mode of
//! this call is absorbed by the pipeline: the notice still goes out, just
//! without the image. The error enum exists so the caller can log what went
//! wrong instead of silently swallowing it.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::config::Config;

/// A random GIF reference returned by the lookup service.
#[derive(Debug, Clone, PartialEq)]
pub struct GifImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub title: String,
}

/// Why the GIF lookup produced nothing.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("gif request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("gif service returned status {0}")]
    Status(u16),

    #[error("gif response malformed: {0}")]
    Malformed(String),
}

/// Response envelope of the random-GIF endpoint.
#[derive(Debug, Deserialize)]
struct RandomGifResponse {
    data: RandomGifData,
}

#[derive(Debug, Deserialize)]
struct RandomGifData {
    image_url: String,
    image_width: u32,
    image_height: u32,
    #[serde(default)]
    title: String,
}

/// Fetch one random GIF matching the configured tag and rating.
///
/// The caller treats the result as optional; an `Err` here never blocks the
/// pipeline.
pub async fn fetch_gif(client: &Client, config: &Config) -> Result<GifImage, EnrichError> {
    let response = client
        .get(format!("{}/random", config.giphy_base_url))
        .query(&[
            ("api_key", config.giphy_api_key.as_str()),
            ("tag", config.gif_tag.as_str()),
            ("rating", config.gif_rating.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(EnrichError::Status(status.as_u16()));
    }

    let body: RandomGifResponse = response
        .json()
        .await
        .map_err(|e| EnrichError::Malformed(e.to_string()))?;

    if body.data.image_url.is_empty() {
        return Err(EnrichError::Malformed("empty image_url".to_string()));
    }

    info!(
        image_url = %body.data.image_url,
        width = body.data.image_width,
        height = body.data.image_height,
        "gif_fetched"
    );

    Ok(GifImage {
        url: body.data.image_url,
        width: body.data.image_width,
        height: body.data.image_height,
        title: body.data.title,
    })
}
