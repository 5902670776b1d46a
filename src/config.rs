//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Messenger platform credentials and server settings.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// App secret used to verify webhook signatures.
    pub app_secret: SecretString,
    /// Arbitrary token echoed during the webhook verification handshake.
    pub verify_token: String,
    /// Page access token for the Send API.
    pub page_access_token: SecretString,
    /// Public URL where the bot is reachable (used for hosted assets).
    pub server_url: String,
    /// Port to bind the webhook server on.
    pub port: u16,
}

impl BotConfig {
    /// Load configuration from environment variables.
    ///
    /// The three Messenger credentials are required; server URL and port
    /// have sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let app_secret = required("MESSENGER_APP_SECRET")?;
        let verify_token = required("MESSENGER_VALIDATION_TOKEN")?;
        let page_access_token = required("MESSENGER_PAGE_ACCESS_TOKEN")?;

        let server_url =
            std::env::var("SERVER_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);

        Ok(Self {
            app_secret: SecretString::from(app_secret),
            verify_token,
            page_access_token: SecretString::from(page_access_token),
            server_url,
            port,
        })
    }
}

fn required(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Dialogue tuning knobs.
#[derive(Debug, Clone)]
pub struct DialogConfig {
    /// Offset from the turn start before the hours follow-up of a staged
    /// business reply.
    pub hours_delay: Duration,
    /// Offset from the turn start before the map-link follow-up.
    pub map_delay: Duration,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            hours_delay: Duration::from_millis(1500),
            map_delay: Duration::from_millis(3000),
        }
    }
}
