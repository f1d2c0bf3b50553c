//! Authentication error types.

use marquee_core::error::MarqueeError;
use thiserror::Error;

/// Errors from credential, code and token checks.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately carries no detail
    /// about which.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account not verified")]
    AccountNotVerified,

    #[error("account already verified")]
    AlreadyVerified,

    /// Missing challenge or code mismatch.
    #[error("invalid one-time code")]
    OtpInvalid,

    #[error("one-time code has expired")]
    OtpExpired,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

/// Maps auth failures to the shared error type with client-safe
/// reasons. JWT library detail never crosses this boundary.
impl From<AuthError> for MarqueeError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => MarqueeError::AuthenticationFailed {
                reason: "Invalid credentials".to_string(),
            },
            AuthError::AccountNotVerified => MarqueeError::AuthenticationFailed {
                reason: "Account not verified".to_string(),
            },
            AuthError::AlreadyVerified => MarqueeError::Validation {
                message: "Account already verified".to_string(),
            },
            AuthError::OtpInvalid => MarqueeError::AuthenticationFailed {
                reason: "Invalid OTP".to_string(),
            },
            AuthError::OtpExpired => MarqueeError::AuthenticationFailed {
                reason: "OTP expired".to_string(),
            },
            AuthError::TokenExpired => MarqueeError::AuthenticationFailed {
                reason: "Token expired".to_string(),
            },
            AuthError::TokenInvalid(_) => MarqueeError::AuthenticationFailed {
                reason: "Invalid token".to_string(),
            },
            AuthError::Crypto(message) => MarqueeError::Crypto(message),
        }
    }
}
