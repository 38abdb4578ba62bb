//! Shared types for the cashier
//!
//! Domain models (products, payment methods, transactions), the unified
//! error system and small utilities used by both the cashier core and the
//! backend client.

pub mod error;
pub mod models;
pub mod util;

pub use error::{AppError, ErrorCode};
