//! Database-specific error types and conversions.

use marquee_core::error::MarqueeError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity}")]
    AlreadyExists { entity: String },

    /// A stored row that cannot be mapped back into a domain value.
    #[error("Invalid stored data: {0}")]
    Data(String),

    #[error("Password hash error: {0}")]
    Hash(String),
}

impl From<DbError> for MarqueeError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => MarqueeError::NotFound { entity, id },
            DbError::AlreadyExists { entity } => MarqueeError::AlreadyExists { entity },
            DbError::Hash(message) => MarqueeError::Crypto(message),
            other => MarqueeError::Database(other.to_string()),
        }
    }
}
