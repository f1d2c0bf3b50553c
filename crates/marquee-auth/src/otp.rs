//! One-time passcode generation and checks.

use chrono::{Duration, Utc};
use marquee_core::models::account::OtpChallenge;
use rand::Rng;

use crate::error::AuthError;

/// Generate a uniformly random six-digit code.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    rng.random_range(100_000..=999_999).to_string()
}

/// Build a challenge expiring `lifetime_secs` from now.
pub fn new_challenge(lifetime_secs: u64) -> OtpChallenge {
    OtpChallenge {
        code: generate_code(),
        expires_at: Utc::now() + Duration::seconds(lifetime_secs as i64),
    }
}

/// Check a submitted code against the stored challenge.
///
/// The code comparison runs before the expiry check, so a wrong code
/// reports `OtpInvalid` even when the challenge has also expired.
pub fn check(challenge: Option<&OtpChallenge>, submitted: &str) -> Result<(), AuthError> {
    let challenge = challenge.ok_or(AuthError::OtpInvalid)?;

    if challenge.code != submitted {
        return Err(AuthError::OtpInvalid);
    }
    if challenge.is_expired(Utc::now()) {
        return Err(AuthError::OtpExpired);
    }

    Ok(())
}
