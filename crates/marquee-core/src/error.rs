//! Error types shared across the Marquee service.

use thiserror::Error;

/// Top-level error type for the account service.
#[derive(Debug, Error)]
pub enum MarqueeError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    /// Credential, code or token checks that failed. The reason is
    /// safe to show to the client.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Mail delivery failed: {0}")]
    Mail(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience result type used throughout the workspace.
pub type MarqueeResult<T> = Result<T, MarqueeError>;
