//! Account model and its input/output types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A pending one-time passcode challenge.
///
/// Each account holds at most one live challenge per purpose
/// (verification, password reset). Issuing a new code overwrites the
/// previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpChallenge {
    /// Six-digit code exactly as mailed to the user.
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl OtpChallenge {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Argon2id hash in PHC string format. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the email address has been confirmed via OTP.
    pub verified: bool,
    /// Free-form role name. New accounts get `user`.
    pub role: String,
    /// Live email-verification challenge, if one has been issued.
    pub verify_otp: Option<OtpChallenge>,
    /// Live password-reset challenge, if one has been issued.
    pub reset_otp: Option<OtpChallenge>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub name: String,
    pub email: String,
    /// Raw password. The repository hashes it before storage.
    pub password: String,
}

/// Input for updating an account. All fields optional.
///
/// The OTP slots are doubly optional: `Some(Some(c))` arms challenge
/// `c`, `Some(None)` clears the slot, `None` leaves it untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccount {
    pub name: Option<String>,
    /// Raw replacement password. The repository hashes it before
    /// storage.
    pub password: Option<String>,
    pub verified: Option<bool>,
    pub verify_otp: Option<Option<OtpChallenge>>,
    pub reset_otp: Option<Option<OtpChallenge>>,
}

/// Client-facing projection of an [`Account`].
///
/// Field names follow the frontend's camelCase contract. The password
/// hash and OTP slots are structurally absent, not merely skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAccount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_account_verified: bool,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for PublicAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            is_account_verified: account.verified,
            role: account.role,
            created_at: account.created_at,
        }
    }
}
