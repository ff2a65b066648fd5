use thiserror::Error;

/// Failures surfaced by the football data client and the matches endpoint
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure, timeout, or the provider rejected the request
    #[error("{0}")]
    Upstream(String),

    /// The provider answered but the body was not what we expected
    #[error("failed to decode API-Football response: {0}")]
    Decode(String),

    /// A required credential is missing. Logged at startup; calls still go out
    /// and fail upstream.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A query parameter could not be understood
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Whether the failure was caused by the caller rather than by us or the provider
    pub fn is_client_error(&self) -> bool {
        matches!(self, ApiError::InvalidRequest(_))
    }
}
