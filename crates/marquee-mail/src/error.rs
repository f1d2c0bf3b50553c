//! Mail transport error types.

use marquee_core::error::MarqueeError;
use thiserror::Error;

/// Errors from the outbound mail transport.
#[derive(Debug, Error)]
pub enum MailError {
    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    Client(reqwest::Error),

    /// The request never completed (connection, DNS, timeout).
    #[error("send failed: {0}")]
    Transport(reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("provider rejected message (status={status}): {detail}")]
    Rejected {
        status: reqwest::StatusCode,
        detail: String,
    },
}

impl From<MailError> for MarqueeError {
    fn from(err: MailError) -> Self {
        MarqueeError::Mail(err.to_string())
    }
}
