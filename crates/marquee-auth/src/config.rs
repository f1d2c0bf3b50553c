//! Authentication configuration.

/// Configuration for session tokens, OTP lifetimes and login policy.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared secret for HS256 session-token signing. Must be set from
    /// the environment; there is no usable default.
    pub jwt_secret: String,
    /// Session token lifetime in seconds (default: 7 days).
    pub session_lifetime_secs: u64,
    /// One-time passcode lifetime in seconds (default: 10 minutes).
    pub otp_lifetime_secs: u64,
    /// When true, accounts must verify their email before logging in.
    pub require_verified_login: bool,
    /// Roles exempt from the verified-login requirement.
    pub verification_exempt_roles: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            session_lifetime_secs: 7 * 24 * 60 * 60,
            otp_lifetime_secs: 10 * 60,
            require_verified_login: false,
            verification_exempt_roles: vec!["admin".to_string()],
        }
    }
}
