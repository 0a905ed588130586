use thiserror::Error;

/// Errors returned by the engagement services.
///
/// Every variant is mapped to an HTTP status in `server::error`; the match there
/// has no wildcard arm, so a new kind has to be classified explicitly.
#[derive(Error, Debug)]
pub enum EngagementError {
    /// The caller sent a missing or malformed parameter
    #[error("{0}")]
    InvalidInput(String),

    /// An optional capability (e.g. vector search) is not set up
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// The store or the embedding provider failed
    #[error("{0:#}")]
    Backend(#[from] anyhow::Error),
}

impl EngagementError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

pub type EngagementResult<T> = std::result::Result<T, EngagementError>;
