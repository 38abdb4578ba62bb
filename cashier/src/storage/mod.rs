//! Persistence backends
//!
//! The cashier core talks to persistence only through
//! [`CatalogRepository`](crate::catalog::CatalogRepository) and
//! [`TransactionRepository`](crate::transactions::TransactionRepository).
//! [`memory::InMemoryBackend`] implements both without a network;
//! [`crate::remote::RemoteBackend`] implements them over HTTP.

pub mod memory;

pub use memory::InMemoryBackend;

use shared::ErrorCode;
use thiserror::Error;

/// Repository error
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend refused the payload
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backend could not be reached (connect failure, timeout)
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with an error or an unreadable body
    #[error("Backend error: {0}")]
    Backend(String),
}

impl RepoError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Unavailable(_) => ErrorCode::NetworkError,
            Self::Backend(_) => ErrorCode::RemoteError,
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
