//! Configuration module for environment variable parsing.
//!
//! All configuration is read once at startup into a plain struct and injected
//! into the handlers through `AppState`. Nothing reads the environment at
//! request time.

use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Shared secret for the token verification service
    pub recaptcha_secret: String,

    /// Token verification endpoint (overridable for tests)
    pub recaptcha_url: String,

    /// API key for the GIF lookup service
    pub giphy_api_key: String,

    /// Base URL of the GIF lookup service, without trailing slash
    pub giphy_base_url: String,

    /// Tag used when requesting a random GIF
    pub gif_tag: String,

    /// Content rating used when requesting a random GIF
    pub gif_rating: String,

    /// Mailgun API key for message delivery
    pub mailgun_api_key: String,

    /// Mailgun sending domain
    pub mailgun_domain: String,

    /// Mailgun API base URL, without trailing slash (overridable for tests)
    pub mailgun_base_url: String,

    /// Sender address for outgoing notices
    pub from_email: String,

    /// Static subject line for outgoing notices
    pub subject: String,

    /// Currency symbol prepended to the amount in the message body
    pub currency_symbol: String,

    /// HTTP request timeout in milliseconds, applied to all downstream calls
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            recaptcha_secret: env::var("RECAPTCHA_SECRET").unwrap_or_default(),

            recaptcha_url: env::var("RECAPTCHA_URL").unwrap_or_else(|_| {
                "https://www.google.com/recaptcha/api/siteverify".to_string()
            }),

            giphy_api_key: env::var("GIPHY_API_KEY").unwrap_or_default(),

            giphy_base_url: env::var("GIPHY_URL")
                .unwrap_or_else(|_| "https://api.giphy.com/v1/gifs".to_string()),

            gif_tag: env::var("GIF_TAG").unwrap_or_else(|_| "money".to_string()),

            gif_rating: env::var("GIF_RATING").unwrap_or_else(|_| "g".to_string()),

            mailgun_api_key: env::var("MAILGUN_API_KEY").unwrap_or_default(),

            mailgun_domain: env::var("MAILGUN_DOMAIN").unwrap_or_default(),

            mailgun_base_url: env::var("MAILGUN_URL")
                .unwrap_or_else(|_| "https://api.mailgun.net/v3".to_string()),

            from_email: env::var("FROM_EMAIL")
                .unwrap_or_else(|_| "no-reply@oweme.dev".to_string()),

            subject: env::var("NOTICE_SUBJECT")
                .unwrap_or_else(|_| "Hello, you owe someone money.".to_string()),

            currency_symbol: env::var("CURRENCY_SYMBOL").unwrap_or_else(|_| "$".to_string()),

            request_timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
        }
    }
}

#[cfg(test)]
impl Config {
    /// Baseline configuration for unit tests. Callers override the fields
    /// the test cares about with struct update syntax.
    pub fn for_tests() -> Self {
        Config {
            port: 0,
            recaptcha_secret: "test-secret".to_string(),
            recaptcha_url: String::new(),
            giphy_api_key: "test-gif-key".to_string(),
            giphy_base_url: String::new(),
            gif_tag: "money".to_string(),
            gif_rating: "g".to_string(),
            mailgun_api_key: "test-mg-key".to_string(),
            mailgun_domain: "mg.example.com".to_string(),
            mailgun_base_url: String::new(),
            from_email: "no-reply@example.com".to_string(),
            subject: "Hello, you owe someone money.".to_string(),
            currency_symbol: "$".to_string(),
            request_timeout_ms: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_env();
        assert_eq!(config.gif_rating, "g");
        assert_eq!(config.gif_tag, "money");
        assert!(config.recaptcha_url.contains("siteverify"));
        assert!(config.mailgun_base_url.starts_with("https://"));
    }

    #[test]
    fn test_port_override() {
        env::set_var("PORT", "9191");
        let config = Config::from_env();
        assert_eq!(config.port, 9191);
        env::remove_var("PORT");
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        env::set_var("REQUEST_TIMEOUT_MS", "soon");
        let config = Config::from_env();
        assert_eq!(config.request_timeout_ms, 8000);
        env::remove_var("REQUEST_TIMEOUT_MS");
    }
}
