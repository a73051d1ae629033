use pagemend_core_types::MendError;
use thiserror::Error;

/// Bodies kept on a [`RequestError::Status`] are capped so a misbehaving
/// endpoint cannot flood the logs.
const MAX_BODY_EXCERPT: usize = 512;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid header '{name}'")]
    InvalidHeader { name: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("failed to decode response body: {0}")]
    Decode(String),
}

impl RequestError {
    /// Builds a `Status` error keeping only an excerpt of the body.
    pub(crate) fn status(code: u16, body: &str) -> Self {
        let excerpt: String = body.chars().take(MAX_BODY_EXCERPT).collect();
        let body = if body.chars().count() > MAX_BODY_EXCERPT {
            format!("{excerpt}...")
        } else {
            excerpt
        };
        Self::Status { code, body }
    }
}

impl From<RequestError> for MendError {
    fn from(err: RequestError) -> Self {
        MendError::new(err.to_string())
    }
}
