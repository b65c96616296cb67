//! Error types for the rating service
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate. Callers that need to branch on a specific condition can
//! `downcast_ref::<RatingError>()` the returned error.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Missing performance score for participant: {participant_id}")]
    MissingPerformanceScore { participant_id: String },

    #[error("Invalid match: {reason}")]
    InvalidMatch { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal service error: {message}")]
    InternalError { message: String },
}
