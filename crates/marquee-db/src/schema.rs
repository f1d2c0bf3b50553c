//! Schema definitions and migration runner.
//!
//! Tables are SCHEMAFULL for data integrity. Account IDs are UUID
//! strings supplied by the application; timestamps are stored as Unix
//! seconds so rows round-trip through plain serde types.

use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::error::DbError;

/// Bookkeeping table for applied migrations. Always ensured first,
/// with IF NOT EXISTS so reruns are safe.
const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Accounts
-- =======================================================================
DEFINE TABLE account SCHEMAFULL;
DEFINE FIELD name ON TABLE account TYPE string;
DEFINE FIELD email ON TABLE account TYPE string;
DEFINE FIELD password_hash ON TABLE account TYPE string;
DEFINE FIELD verified ON TABLE account TYPE bool DEFAULT false;
DEFINE FIELD role ON TABLE account TYPE string DEFAULT 'user';
-- One live challenge per purpose; both columns set or both NONE.
DEFINE FIELD verify_otp_code ON TABLE account TYPE option<string>;
DEFINE FIELD verify_otp_expires_at ON TABLE account TYPE option<int>;
DEFINE FIELD reset_otp_code ON TABLE account TYPE option<string>;
DEFINE FIELD reset_otp_expires_at ON TABLE account TYPE option<int>;
DEFINE FIELD created_at ON TABLE account TYPE int;
DEFINE FIELD updated_at ON TABLE account TYPE int;
DEFINE INDEX idx_account_email ON TABLE account COLUMNS email UNIQUE;
";

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

#[derive(Debug, Deserialize)]
struct MigrationRecord {
    version: u32,
}

/// Apply any migrations newer than the recorded schema version.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let applied: Vec<MigrationRecord> = result.take(0)?;
    let current_version = applied.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );

        db.query(migration.sql).await?.check().map_err(|e| {
            DbError::Migration(format!(
                "migration v{} '{}' failed: {e}",
                migration.version, migration.name
            ))
        })?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "failed to record migration v{}: {e}",
                    migration.version
                ))
            })?;
    }

    Ok(())
}

/// The v1 schema DDL, exposed for inspection and tooling.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
