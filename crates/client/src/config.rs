//! Client configuration.

use std::time::Duration;

/// Connection settings for the JobBOSS2 REST API.
///
/// `api_url` is the API origin (e.g. `https://api.example.com`); `token_url`
/// is the full OAuth2 token endpoint, which may live on a different host.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub api_key: String,
    pub api_secret: String,
    pub token_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
}
