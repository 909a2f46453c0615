use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Anthropic API key is not configured")]
    MissingApiKey,

    #[error("Anthropic API key contains characters that are not valid in an HTTP header")]
    InvalidApiKey,

    #[error("Invalid upstream proxy: {0}")]
    InvalidProxy(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Anthropic client is not initialized: {0}")]
    NotInitialized(String),

    #[error("Request to Anthropic API failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Anthropic API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// Upstream HTTP status, when the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
