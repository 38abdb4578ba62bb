//! Unified error codes for the cashier
//!
//! This module defines all error codes shared by the cashier core, the
//! backend client and any front-end that renders notifications.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Transaction and cart errors
//! - 5xxx: Payment errors
//! - 6xxx: Product errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Response body did not match the expected shape
    InvalidFormat = 6,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Transaction ====================
    /// Transaction not found
    TransactionNotFound = 4001,
    /// Cart is empty or no payment method selected
    TransactionIncomplete = 4002,
    /// Pre-order without buyer name
    BuyerNameRequired = 4003,
    /// Cart line index out of range
    CartLineNotFound = 4004,
    /// Quantity below 1 or above the per-line maximum
    InvalidQuantity = 4005,

    // ==================== 5xxx: Payment ====================
    /// Payment method not found
    PaymentMethodNotFound = 5001,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product has invalid price
    ProductInvalidPrice = 6002,

    // ==================== 9xxx: System ====================
    /// Report could not be written
    ExportFailed = 9001,
    /// Remote backend rejected the request
    RemoteError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Whether retrying the same request may succeed
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCode::NetworkError | ErrorCode::TimeoutError | ErrorCode::RemoteError
        )
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            6 => Ok(ErrorCode::InvalidFormat),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Transaction
            4001 => Ok(ErrorCode::TransactionNotFound),
            4002 => Ok(ErrorCode::TransactionIncomplete),
            4003 => Ok(ErrorCode::BuyerNameRequired),
            4004 => Ok(ErrorCode::CartLineNotFound),
            4005 => Ok(ErrorCode::InvalidQuantity),

            // Payment
            5001 => Ok(ErrorCode::PaymentMethodNotFound),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),

            // System
            9001 => Ok(ErrorCode::ExportFailed),
            9002 => Ok(ErrorCode::RemoteError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
