//! Cashier error type
//!
//! Every operation of the cashier core returns [`CashierResult`]. Errors are
//! values surfaced to the cashier as a notification; none of them ends the
//! session. [`AppError`] is the notification shape (code + message).

use std::fmt;

use shared::{AppError, ErrorCode};
use thiserror::Error;

use crate::cart::CartError;
use crate::reports::ExportError;
use crate::storage::RepoError;
use crate::transactions::{LedgerError, ValidationError};

/// Kind of entity a lookup failed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Product,
    PaymentMethod,
    Transaction,
}

impl Resource {
    fn not_found_code(self) -> ErrorCode {
        match self {
            Self::Product => ErrorCode::ProductNotFound,
            Self::PaymentMethod => ErrorCode::PaymentMethodNotFound,
            Self::Transaction => ErrorCode::TransactionNotFound,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Product => "Product",
            Self::PaymentMethod => "Payment method",
            Self::Transaction => "Transaction",
        })
    }
}

#[derive(Debug, Error)]
pub enum CashierError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Catalog input rejected before reaching the backend
    #[error("Invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    #[error("{resource} not found: {id}")]
    NotFound { resource: Resource, id: String },

    /// Remote persistence failed; local state is unchanged
    #[error("Persistence failed: {0}")]
    Persistence(#[from] RepoError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

impl CashierError {
    pub fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(resource: Resource, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Persistence failure, with a backend "not found" attributed to `resource`
    pub fn from_repo(err: RepoError, resource: Resource, id: &str) -> Self {
        match err {
            RepoError::NotFound(_) => Self::not_found(resource, id),
            other => Self::Persistence(other),
        }
    }

    /// Map to the unified error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Cart(e) => e.code(),
            Self::Validation(e) => e.code(),
            Self::InvalidInput { field: "price", .. } => ErrorCode::ProductInvalidPrice,
            Self::InvalidInput { .. } => ErrorCode::ValidationFailed,
            Self::NotFound { resource, .. } => resource.not_found_code(),
            Self::Persistence(e) => e.code(),
            Self::Export(_) => ErrorCode::ExportFailed,
        }
    }

    /// Whether the cashier can retry the same action unchanged
    pub fn is_retryable(&self) -> bool {
        self.code().is_retryable()
    }
}

impl From<LedgerError> for CashierError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(id) => Self::not_found(Resource::Transaction, id),
        }
    }
}

impl From<&CashierError> for AppError {
    fn from(err: &CashierError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match err {
            CashierError::InvalidInput { field, .. } => app.with_detail("field", *field),
            CashierError::NotFound { id, .. } => app.with_detail("id", id.as_str()),
            _ => app,
        }
    }
}

pub type CashierResult<T> = Result<T, CashierError>;
