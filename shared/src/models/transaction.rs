//! Transaction Model
//!
//! A transaction is the immutable record of one submitted cart. Only
//! [`Transaction::payment_status`] may change after creation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Buyer name recorded for walk-in (pickup) sales
pub const WALK_IN_BUYER: &str = "Umum";

/// How the goods leave the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryType {
    /// Immediate pickup, always paid
    #[default]
    Pickup,
    /// Pre-order (PO), named buyer with independent payment tracking
    PreOrder,
}

/// Payment status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
}

impl PaymentStatus {
    pub fn from_paid(is_paid: bool) -> Self {
        if is_paid { Self::Paid } else { Self::Pending }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown payment status
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment status: {0}")]
pub struct UnknownPaymentStatus(pub String);

impl FromStr for PaymentStatus {
    type Err = UnknownPaymentStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paid" | "lunas" => Ok(Self::Paid),
            "pending" => Ok(Self::Pending),
            other => Err(UnknownPaymentStatus(other.to_string())),
        }
    }
}

/// Payment method as referenced from a transaction
///
/// The name is resolved when the transaction is read and may be empty for a
/// freshly built transaction that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodRef {
    pub id: String,
    pub name: String,
}

/// One line of a transaction, copied from the cart at submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionItem {
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl TransactionItem {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A validated transaction that has not been persisted yet
///
/// Produced by the transaction builder; the persistence layer assigns the
/// final id and may override `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub created_at: DateTime<Utc>,
    pub buyer_name: String,
    pub delivery_type: DeliveryType,
    pub payment_status: PaymentStatus,
    pub payment_method_id: String,
    pub items: Vec<TransactionItem>,
    pub total: Decimal,
    /// Client-generated token, stable across retries of the same cart
    pub idempotency_key: String,
}

impl NewTransaction {
    /// Attach the persistence-assigned identity
    pub fn into_transaction(
        self,
        id: impl Into<String>,
        created_at: DateTime<Utc>,
        payment_method_name: impl Into<String>,
    ) -> Transaction {
        Transaction {
            id: id.into(),
            created_at,
            buyer_name: self.buyer_name,
            delivery_type: self.delivery_type,
            payment_status: self.payment_status,
            payment_method: PaymentMethodRef {
                id: self.payment_method_id,
                name: payment_method_name.into(),
            },
            items: self.items,
            total: self.total,
            idempotency_key: Some(self.idempotency_key),
        }
    }
}

/// Submitted transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub buyer_name: String,
    pub delivery_type: DeliveryType,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethodRef,
    pub items: Vec<TransactionItem>,
    /// Stored at submission, never recomputed
    pub total: Decimal,
    /// Absent for records loaded from a backend that does not echo it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

impl Transaction {
    pub fn is_pre_order(&self) -> bool {
        self.delivery_type == DeliveryType::PreOrder
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status.is_paid()
    }

    /// Total number of units across all items
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Case-insensitive substring match on buyer name or any item name
    ///
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.buyer_name.to_lowercase().contains(needle)
            || self
                .items
                .iter()
                .any(|item| item.name.to_lowercase().contains(needle))
    }
}
