use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// Request never produced a response (connect failure, timeout, TLS, ...)
    #[error("Failed to reach provider: {0}")]
    Transport(#[from] reqwest::Error),
    /// Provider answered with a non-success status
    #[error("Provider rejected request with status {status}: {body}")]
    Rejected {
        status: u16,
        body: serde_json::Value,
    },
    /// Provider answered successfully but the body was not what we expected
    #[error("Failed to decode provider response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Whether retrying the same request may succeed.
    ///
    /// Transport failures, rate limiting and provider side errors are transient, anything
    /// else is a permanent rejection of the request.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(err) => !err.is_builder() && !err.is_decode(),
            Self::Rejected { status, .. } => *status == 429 || *status >= 500,
            Self::Decode(_) => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("Signature header is missing a timestamp or v1 signature")]
    MalformedHeader,
    #[error("Webhook timestamp {timestamp} is outside the {tolerance_secs}s tolerance")]
    TimestampOutsideTolerance { timestamp: i64, tolerance_secs: i64 },
    #[error("No v1 signature matches the payload")]
    NoMatchingSignature,
    #[error("Failed to parse webhook payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}
