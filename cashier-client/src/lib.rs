//! Cashier Client - HTTP client for the cashier backend
//!
//! Provides network-based calls for the catalog (products, payment methods)
//! and the transaction ledger, translating the backend's wire shapes into
//! the shared models.

pub mod config;
pub mod dto;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use dto::CreatedTransaction;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, IDEMPOTENCY_HEADER};
