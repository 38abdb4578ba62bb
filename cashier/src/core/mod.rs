//! Core module - configuration and error definitions
//!
//! - [`Config`] - cashier configuration
//! - [`CashierError`] - cashier errors

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{CashierError, CashierResult, Resource};
