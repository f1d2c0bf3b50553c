//! Environment-backed configuration.
//!
//! All variables use the `MARQUEE_` prefix. `MARQUEE_JWT_SECRET` is
//! the only required one; everything else has a development default.

use marquee_auth::AuthConfig;
use marquee_db::DbConfig;
use marquee_mail::MailConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Full server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address, e.g. `0.0.0.0:4000`.
    pub listen_addr: String,
    /// Origins allowed to send credentialed requests.
    pub allowed_origins: Vec<String>,
    /// Production switches session cookies to `SameSite=None; Secure`.
    pub production: bool,
    pub db: DbConfig,
    pub auth: AuthConfig,
    pub mail: MailConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env_string("MARQUEE_JWT_SECRET")
            .ok_or(ConfigError::Missing("MARQUEE_JWT_SECRET"))?;

        let mut auth = AuthConfig {
            jwt_secret,
            ..AuthConfig::default()
        };
        if let Some(v) = env_parse::<u64>("MARQUEE_SESSION_LIFETIME_SECS")? {
            auth.session_lifetime_secs = v;
        }
        if let Some(v) = env_parse::<u64>("MARQUEE_OTP_LIFETIME_SECS")? {
            auth.otp_lifetime_secs = v;
        }
        if let Some(v) = env_parse::<bool>("MARQUEE_REQUIRE_VERIFIED_LOGIN")? {
            auth.require_verified_login = v;
        }
        if let Some(v) = env_string("MARQUEE_VERIFICATION_EXEMPT_ROLES") {
            auth.verification_exempt_roles = split_csv(&v);
        }

        let mut db = DbConfig::default();
        if let Some(v) = env_string("MARQUEE_DB_URL") {
            db.url = v;
        }
        if let Some(v) = env_string("MARQUEE_DB_NAMESPACE") {
            db.namespace = v;
        }
        if let Some(v) = env_string("MARQUEE_DB_DATABASE") {
            db.database = v;
        }
        if let Some(v) = env_string("MARQUEE_DB_USERNAME") {
            db.username = v;
        }
        if let Some(v) = env_string("MARQUEE_DB_PASSWORD") {
            db.password = v;
        }

        let mut mail = MailConfig::default();
        if let Some(v) = env_string("MARQUEE_MAIL_API_URL") {
            mail.api_url = v;
        }
        if let Some(v) = env_string("MARQUEE_MAIL_API_KEY") {
            mail.api_key = v;
        }
        if let Some(v) = env_string("MARQUEE_SENDER_EMAIL") {
            mail.sender_email = v;
        }
        mail.sender_name = env_string("MARQUEE_SENDER_NAME");
        if let Some(v) = env_parse::<u64>("MARQUEE_MAIL_TIMEOUT_SECS")? {
            mail.timeout_secs = v;
        }

        Ok(Self {
            listen_addr: env_string("MARQUEE_LISTEN_ADDR")
                .unwrap_or_else(|| "0.0.0.0:4000".to_string()),
            allowed_origins: env_string("MARQUEE_ALLOWED_ORIGINS")
                .map(|v| split_csv(&v))
                .unwrap_or_else(|| vec!["http://localhost:5173".to_string()]),
            production: env_parse::<bool>("MARQUEE_PRODUCTION")?.unwrap_or(false),
            db,
            auth,
            mail,
        })
    }
}

/// Read a variable; blank-after-trim counts as unset.
fn env_string(name: &'static str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env_string(name) {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|e: T::Err| ConfigError::Invalid {
            name,
            message: e.to_string(),
        }),
    }
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
