//! Payment Method Model

use serde::{Deserialize, Serialize};

/// Payment method entity (cash, QRIS, transfer, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
}

/// Create payment method payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethodCreate {
    pub name: String,
}

/// Update payment method payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethodUpdate {
    pub name: String,
}
