//! SurrealDB implementation of [`AccountRepository`].
//!
//! Password hashing uses Argon2id with OWASP-recommended parameters
//! (memory: 19 MiB, iterations: 2, parallelism: 1). The salt is
//! randomly generated per hash.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};
use marquee_core::error::MarqueeResult;
use marquee_core::models::account::{Account, CreateAccount, OtpChallenge, UpdateAccount};
use marquee_core::repository::{AccountRepository, PaginatedResult, Pagination};
use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row for queries where the UUID is already known.
#[derive(Debug, Deserialize)]
struct AccountRow {
    name: String,
    email: String,
    password_hash: String,
    verified: bool,
    role: String,
    verify_otp_code: Option<String>,
    verify_otp_expires_at: Option<i64>,
    reset_otp_code: Option<String>,
    reset_otp_expires_at: Option<i64>,
    created_at: i64,
    updated_at: i64,
}

/// DB-side row that carries the record ID via `meta::id(id)`.
#[derive(Debug, Deserialize)]
struct AccountRowWithId {
    record_id: String,
    name: String,
    email: String,
    password_hash: String,
    verified: bool,
    role: String,
    verify_otp_code: Option<String>,
    verify_otp_expires_at: Option<i64>,
    reset_otp_code: Option<String>,
    reset_otp_expires_at: Option<i64>,
    created_at: i64,
    updated_at: i64,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

fn datetime_from_secs(secs: i64) -> Result<DateTime<Utc>, DbError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| DbError::Data(format!("timestamp out of range: {secs}")))
}

/// Both columns present means a live challenge; anything else reads as
/// an empty slot.
fn otp_from_columns(code: Option<String>, expires_at: Option<i64>) -> Option<OtpChallenge> {
    match (code, expires_at) {
        (Some(code), Some(secs)) => Some(OtpChallenge {
            code,
            expires_at: DateTime::from_timestamp(secs, 0)?,
        }),
        _ => None,
    }
}

impl AccountRow {
    fn into_account(self, id: Uuid) -> Result<Account, DbError> {
        Ok(Account {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            verified: self.verified,
            role: self.role,
            verify_otp: otp_from_columns(self.verify_otp_code, self.verify_otp_expires_at),
            reset_otp: otp_from_columns(self.reset_otp_code, self.reset_otp_expires_at),
            created_at: datetime_from_secs(self.created_at)?,
            updated_at: datetime_from_secs(self.updated_at)?,
        })
    }
}

impl AccountRowWithId {
    fn try_into_account(self) -> Result<Account, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Data(format!("invalid UUID: {e}")))?;

        Ok(Account {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            verified: self.verified,
            role: self.role,
            verify_otp: otp_from_columns(self.verify_otp_code, self.verify_otp_expires_at),
            reset_otp: otp_from_columns(self.reset_otp_code, self.reset_otp_expires_at),
            created_at: datetime_from_secs(self.created_at)?,
            updated_at: datetime_from_secs(self.updated_at)?,
        })
    }
}

/// Hash a password with Argon2id.
fn hash_password(password: &str) -> Result<String, DbError> {
    // OWASP ASVS recommended: m=19456 (19 MiB), t=2, p=1
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| DbError::Hash(format!("argon2 params error: {e}")))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DbError::Hash(format!("password hash error: {e}")))?;

    Ok(hash.to_string())
}

fn map_create_error(e: surrealdb::Error) -> DbError {
    // Unique email index violations lose a race the pre-check missed.
    if e.to_string().contains("already contains") {
        DbError::AlreadyExists {
            entity: "account".to_string(),
        }
    } else {
        DbError::Surreal(e)
    }
}

/// SurrealDB implementation of the account repository.
#[derive(Clone)]
pub struct SurrealAccountRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAccountRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AccountRepository for SurrealAccountRepository<C> {
    async fn create(&self, input: CreateAccount) -> MarqueeResult<Account> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let now = Utc::now().timestamp();

        let password_hash = hash_password(&input.password)?;

        let result = self
            .db
            .query(
                "CREATE type::thing('account', $id) SET \
                 name = $name, \
                 email = $email, \
                 password_hash = $password_hash, \
                 verified = false, \
                 role = 'user', \
                 verify_otp_code = NONE, \
                 verify_otp_expires_at = NONE, \
                 reset_otp_code = NONE, \
                 reset_otp_expires_at = NONE, \
                 created_at = $now, \
                 updated_at = $now",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("email", input.email))
            .bind(("password_hash", password_hash))
            .bind(("now", now))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(map_create_error)?;

        let rows: Vec<AccountRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "account".to_string(),
            id: id_str,
        })?;

        Ok(row.into_account(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> MarqueeResult<Account> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::thing('account', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AccountRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "account".to_string(),
            id: id_str,
        })?;

        Ok(row.into_account(id)?)
    }

    async fn get_by_email(&self, email: &str) -> MarqueeResult<Account> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM account WHERE email = $email")
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AccountRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "account".to_string(),
            id: email.to_string(),
        })?;

        Ok(row.try_into_account()?)
    }

    async fn update(&self, id: Uuid, input: UpdateAccount) -> MarqueeResult<Account> {
        let id_str = id.to_string();

        let password_hash = match input.password.as_deref() {
            Some(raw) => Some(hash_password(raw)?),
            None => None,
        };

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if password_hash.is_some() {
            sets.push("password_hash = $password_hash");
        }
        if input.verified.is_some() {
            sets.push("verified = $verified");
        }
        if input.verify_otp.is_some() {
            sets.push("verify_otp_code = $verify_otp_code");
            sets.push("verify_otp_expires_at = $verify_otp_expires_at");
        }
        if input.reset_otp.is_some() {
            sets.push("reset_otp_code = $reset_otp_code");
            sets.push("reset_otp_expires_at = $reset_otp_expires_at");
        }
        sets.push("updated_at = $updated_at");

        let query = format!(
            "UPDATE type::thing('account', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(query)
            .bind(("id", id_str.clone()))
            .bind(("updated_at", Utc::now().timestamp()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(hash) = password_hash {
            builder = builder.bind(("password_hash", hash));
        }
        if let Some(verified) = input.verified {
            builder = builder.bind(("verified", verified));
        }
        if let Some(challenge) = input.verify_otp {
            // Binding None writes NONE, which clears the slot.
            builder = builder
                .bind(("verify_otp_code", challenge.as_ref().map(|c| c.code.clone())))
                .bind((
                    "verify_otp_expires_at",
                    challenge.map(|c| c.expires_at.timestamp()),
                ));
        }
        if let Some(challenge) = input.reset_otp {
            builder = builder
                .bind(("reset_otp_code", challenge.as_ref().map(|c| c.code.clone())))
                .bind((
                    "reset_otp_expires_at",
                    challenge.map(|c| c.expires_at.timestamp()),
                ));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<AccountRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "account".to_string(),
            id: id_str,
        })?;

        Ok(row.into_account(id)?)
    }

    async fn list(&self, pagination: Pagination) -> MarqueeResult<PaginatedResult<Account>> {
        let total = self.count().await?;

        let mut result = self
            .db
            // Secondary sort on email keeps pages stable when rows
            // share a creation second.
            .query(
                "SELECT meta::id(id) AS record_id, * FROM account \
                 ORDER BY created_at ASC, email ASC LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AccountRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(|row| row.try_into_account())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn count(&self) -> MarqueeResult<u64> {
        let mut result = self
            .db
            .query("SELECT count() AS total FROM account GROUP ALL")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }
}

/// Verify a password against an Argon2id PHC hash.
///
/// Returns `Ok(false)` on mismatch; other failures (e.g. a corrupt
/// stored hash) are errors.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, DbError> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| DbError::Hash(format!("invalid hash format: {e}")))?;

    let argon2 = Argon2::default();
    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(DbError::Hash(format!("password verify error: {e}"))),
    }
}
