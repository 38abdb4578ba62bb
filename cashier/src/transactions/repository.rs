//! Transaction persistence boundary

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{NewTransaction, PaymentStatus, Transaction};

use crate::storage::RepoResult;

/// What persistence reports back after storing a transaction
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTransaction {
    pub id: String,
    /// Backend timestamp, when it assigns one
    pub created_at: Option<DateTime<Utc>>,
    /// Backend total, when it echoes one
    pub total: Option<Decimal>,
}

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Store a new transaction
    ///
    /// Submitting the same `idempotency_key` twice must not create a second
    /// record.
    async fn create_transaction(&self, transaction: &NewTransaction)
    -> RepoResult<PersistedTransaction>;

    async fn list_transactions(&self) -> RepoResult<Vec<Transaction>>;

    async fn patch_payment_status(&self, id: &str, status: PaymentStatus) -> RepoResult<()>;
}
