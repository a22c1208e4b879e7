use thiserror::Error;

/// Errors that can occur during Sagashi core operations.
#[derive(Debug, Error)]
pub enum SagashiError {
    /// The query string is empty or contains only whitespace.
    #[error("query is empty or whitespace-only")]
    EmptyQuery,

    /// A match or slug policy carried an unusable value.
    #[error("invalid match policy: {0}")]
    InvalidPolicy(String),

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),
}

/// Result type alias for Sagashi operations.
pub type Result<T> = std::result::Result<T, SagashiError>;
