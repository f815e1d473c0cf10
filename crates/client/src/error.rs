//! Error types for the JobBOSS2 client.

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration errors (invalid base URL, missing settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// The caller supplied an HTTP method outside the allowed set.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The caller supplied an unsafe or malformed endpoint path.
    #[error("{0}")]
    Endpoint(String),

    /// OAuth2 token acquisition failures.
    #[error("OAuth2 token error: {0}")]
    Auth(String),

    /// Non-2xx responses from the JobBOSS2 API.
    #[error("JobBOSS2 API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// Connect/timeout/IO failures below the HTTP layer.
    #[error("http transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(sanitize_reqwest_error(&value))
    }
}

#[must_use]
pub fn sanitize_reqwest_error(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    if let Some(u) = e.url() {
        msg = msg.replace(u.as_str(), &redact_url(u));
    }
    msg
}

#[must_use]
pub fn redact_url(url: &Url) -> String {
    let mut u = url.clone();
    // Best-effort: drop credentials + query + fragment.
    let _ = u.set_username("");
    let _ = u.set_password(None);
    u.set_query(None);
    u.set_fragment(None);
    u.to_string()
}

#[cfg(test)]
mod tests {
    use super::redact_url;
    use url::Url;

    #[test]
    fn redact_url_drops_credentials_and_query() {
        let url = Url::parse("https://user:pw@erp.example.com/api/v1/orders?token=abc#frag")
            .expect("url");
        assert_eq!(redact_url(&url), "https://erp.example.com/api/v1/orders");
    }
}
