//! Token verification against the reCAPTCHA siteverify API.
//!
//! The verification call gates the whole pipeline: a notice is only delivered
//! when the service confirms the token came from a human interaction. The two
//! failure kinds are kept as distinct variants even though the response
//! mapping currently collapses both to the same status code.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;

/// Why a token did not pass verification.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The verification service could not be reached or answered non-2xx.
    /// Timeouts land here as well.
    #[error("verification service unavailable: {0}")]
    Unavailable(String),

    /// The service answered but judged the token invalid.
    #[error("token rejected by verification service")]
    Rejected { error_codes: Vec<String> },
}

/// Response body of the siteverify endpoint.
#[derive(Debug, Deserialize)]
struct SiteverifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

/// Verify a bot-check token.
///
/// Sends the process secret and the user-supplied token as form data. The
/// call is made exactly once, with the client's shared timeout; there is no
/// retry on failure.
pub async fn verify_token(client: &Client, config: &Config, token: &str) -> Result<(), VerifyError> {
    let response = client
        .post(&config.recaptcha_url)
        .form(&[
            ("secret", config.recaptcha_secret.as_str()),
            ("response", token),
        ])
        .send()
        .await
        .map_err(|e| {
            warn!(error = %e, "verify_request_failed");
            VerifyError::Unavailable(e.to_string())
        })?;

    let status = response.status();
    if !status.is_success() {
        warn!(status_code = status.as_u16(), "verify_non_success_status");
        return Err(VerifyError::Unavailable(format!(
            "verification service returned {}",
            status
        )));
    }

    let body: SiteverifyResponse = response.json().await.map_err(|e| {
        warn!(error = %e, "verify_response_malformed");
        VerifyError::Unavailable(e.to_string())
    })?;

    if body.success {
        info!("verify_token_accepted");
        Ok(())
    } else {
        warn!(error_codes = ?body.error_codes, "verify_token_rejected");
        Err(VerifyError::Rejected {
            error_codes: body.error_codes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(recaptcha_url: String) -> Config {
        Config {
            recaptcha_url,
            recaptcha_secret: "shh".to_string(),
            ..Config::for_tests()
        }
    }

    #[tokio::test]
    async fn test_verify_accepts_successful_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/siteverify"))
            .and(body_string_contains("secret=shh"))
            .and(body_string_contains("response=tok-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
            )
            .mount(&server)
            .await;

        let config = test_config(format!("{}/siteverify", server.uri()));
        let result = verify_token(&Client::new(), &config, "tok-1").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_verify_rejects_failed_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": false,
                "error-codes": ["invalid-input-response"]
            })))
            .mount(&server)
            .await;

        let config = test_config(format!("{}/siteverify", server.uri()));
        let result = verify_token(&Client::new(), &config, "bad").await;
        match result {
            Err(VerifyError::Rejected { error_codes }) => {
                assert_eq!(error_codes, vec!["invalid-input-response"]);
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_verify_maps_server_error_to_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let config = test_config(format!("{}/siteverify", server.uri()));
        let result = verify_token(&Client::new(), &config, "tok").await;
        assert!(matches!(result, Err(VerifyError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_verify_maps_unreachable_host_to_unavailable() {
        // Nothing listens on this port
        let config = test_config("http://127.0.0.1:9/siteverify".to_string());
        let result = verify_token(&Client::new(), &config, "tok").await;
        assert!(matches!(result, Err(VerifyError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_verify_maps_malformed_body_to_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let config = test_config(format!("{}/siteverify", server.uri()));
        let result = verify_token(&Client::new(), &config, "tok").await;
        assert!(matches!(result, Err(VerifyError::Unavailable(_))));
    }
}
