use api_types::ProviderKind;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] oauth2::url::ParseError),

    /// Never carries the request URL, which holds the access token.
    #[error("network error: {0}")]
    Http(reqwest::Error),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("{status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("provider not configured: {0}")]
    NotConfigured(ProviderKind),
}

impl From<reqwest::Error> for ProviderError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value.without_url())
    }
}
