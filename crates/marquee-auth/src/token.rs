//! Session token issuance and verification.
//!
//! Tokens are stateless HS256 JWTs. Holding a token with a valid
//! signature and a future `exp` is the entire session state; nothing
//! is stored server-side and nothing can be revoked early.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject — account ID (UUID string).
    pub sub: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Issue a signed session token for an account.
pub fn issue_session_token(account_id: Uuid, config: &AuthConfig) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: account_id.to_string(),
        iat: now,
        exp: now + config.session_lifetime_secs as i64,
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode error: {e}")))
}

/// Decode and verify a session token.
pub fn decode_session_token(token: &str, config: &AuthConfig) -> Result<SessionClaims, AuthError> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["sub", "exp"]);

    jsonwebtoken::decode::<SessionClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

/// Claims that have passed signature and expiry checks.
#[derive(Debug, Clone)]
pub struct ValidatedSession(pub SessionClaims);

impl ValidatedSession {
    /// Account ID from the `sub` claim.
    pub fn account_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.0.sub)
            .map_err(|e| AuthError::TokenInvalid(format!("bad subject: {e}")))
    }
}

/// Validate a session token and return the verified claims.
///
/// Purely stateless — no database lookup is performed.
pub fn validate_session_token(
    token: &str,
    config: &AuthConfig,
) -> Result<ValidatedSession, AuthError> {
    decode_session_token(token, config).map(ValidatedSession)
}
