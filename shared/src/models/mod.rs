//! Data models
//!
//! Shared between the cashier core and the backend client.
//! All IDs are opaque strings assigned by the backend.

pub mod payment_method;
pub mod product;
pub mod transaction;

// Re-exports
pub use payment_method::*;
pub use product::*;
pub use transaction::*;
