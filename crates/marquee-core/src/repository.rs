//! Repository trait for account storage.
//!
//! The service layer depends on this trait rather than on a concrete
//! database so that business logic stays testable against the
//! in-memory engine.

use uuid::Uuid;

use crate::error::MarqueeResult;
use crate::models::account::{Account, CreateAccount, UpdateAccount};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    /// Total matching records, ignoring pagination.
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

/// Account storage operations.
pub trait AccountRepository: Send + Sync {
    /// Create an account. Fails with `AlreadyExists` when the email is
    /// taken.
    fn create(&self, input: CreateAccount) -> impl Future<Output = MarqueeResult<Account>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = MarqueeResult<Account>> + Send;

    fn get_by_email(&self, email: &str) -> impl Future<Output = MarqueeResult<Account>> + Send;

    /// Apply the set fields of `input`. Fails with `NotFound` when the
    /// account does not exist.
    fn update(
        &self,
        id: Uuid,
        input: UpdateAccount,
    ) -> impl Future<Output = MarqueeResult<Account>> + Send;

    /// List accounts ordered by creation time, oldest first.
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = MarqueeResult<PaginatedResult<Account>>> + Send;

    fn count(&self) -> impl Future<Output = MarqueeResult<u64>> + Send;
}
