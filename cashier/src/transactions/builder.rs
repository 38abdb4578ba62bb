//! Transaction Builder
//!
//! Turns a cart plus the buyer form into a [`NewTransaction`], or explains
//! why it cannot be submitted yet. Building has no side effects.

use chrono::{DateTime, Utc};
use shared::ErrorCode;
use shared::models::{
    DeliveryType, NewTransaction, PaymentStatus, TransactionItem, WALK_IN_BUYER,
};
use thiserror::Error;

use crate::cart::Cart;
use crate::utils::validation::{MAX_NAME_LEN, MAX_QUANTITY};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Empty cart or no payment method selected
    #[error("Add at least one product and choose a payment method")]
    IncompleteTransaction,

    #[error("Buyer name is required for pre-orders")]
    MissingBuyerName,

    #[error("{field} is too long ({len} chars, max {max})")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Quantity of {product} is {quantity}, max {max}")]
    QuantityOutOfRange {
        product: String,
        quantity: u32,
        max: u32,
    },
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::IncompleteTransaction => ErrorCode::TransactionIncomplete,
            Self::MissingBuyerName => ErrorCode::BuyerNameRequired,
            Self::FieldTooLong { .. } => ErrorCode::ValueOutOfRange,
            Self::QuantityOutOfRange { .. } => ErrorCode::InvalidQuantity,
        }
    }
}

/// The buyer form next to the cart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyerContext {
    pub delivery_type: DeliveryType,
    /// Only meaningful for pre-orders
    pub buyer_name: String,
    /// Only meaningful for pre-orders; pickups are always paid
    pub is_paid: bool,
    pub payment_method_id: Option<String>,
}

impl Default for BuyerContext {
    fn default() -> Self {
        Self {
            delivery_type: DeliveryType::Pickup,
            buyer_name: String::new(),
            is_paid: true,
            payment_method_id: None,
        }
    }
}

impl BuyerContext {
    pub fn pickup(payment_method_id: impl Into<String>) -> Self {
        Self {
            payment_method_id: Some(payment_method_id.into()),
            ..Self::default()
        }
    }

    pub fn pre_order(
        buyer_name: impl Into<String>,
        is_paid: bool,
        payment_method_id: impl Into<String>,
    ) -> Self {
        Self {
            delivery_type: DeliveryType::PreOrder,
            buyer_name: buyer_name.into(),
            is_paid,
            payment_method_id: Some(payment_method_id.into()),
        }
    }

    /// Back to a paid pickup with nothing selected
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Build a submittable transaction stamped with the current time and a
/// fresh idempotency key
pub fn build(cart: &Cart, buyer: &BuyerContext) -> Result<NewTransaction, ValidationError> {
    build_at(cart, buyer, Utc::now(), shared::util::idempotency_key())
}

/// Build a submittable transaction with an explicit timestamp and key
///
/// Checks run in order and stop at the first failure:
/// 1. cart non-empty and a payment method selected
/// 2. pre-orders carry a non-blank buyer name
/// 3. length and quantity limits
pub fn build_at(
    cart: &Cart,
    buyer: &BuyerContext,
    created_at: DateTime<Utc>,
    idempotency_key: String,
) -> Result<NewTransaction, ValidationError> {
    let payment_method_id = match buyer.payment_method_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() && !cart.is_empty() => id.to_string(),
        _ => return Err(ValidationError::IncompleteTransaction),
    };

    let (buyer_name, payment_status) = match buyer.delivery_type {
        DeliveryType::PreOrder => {
            let name = buyer.buyer_name.trim();
            if name.is_empty() {
                return Err(ValidationError::MissingBuyerName);
            }
            (name.to_string(), PaymentStatus::from_paid(buyer.is_paid))
        }
        DeliveryType::Pickup => (WALK_IN_BUYER.to_string(), PaymentStatus::Paid),
    };

    let len = buyer_name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(ValidationError::FieldTooLong {
            field: "buyer_name",
            len,
            max: MAX_NAME_LEN,
        });
    }
    if let Some(line) = cart.lines().iter().find(|l| l.quantity > MAX_QUANTITY) {
        return Err(ValidationError::QuantityOutOfRange {
            product: line.name.clone(),
            quantity: line.quantity,
            max: MAX_QUANTITY,
        });
    }

    Ok(NewTransaction {
        created_at,
        buyer_name,
        delivery_type: buyer.delivery_type,
        payment_status,
        payment_method_id,
        items: cart.lines().iter().map(TransactionItem::from).collect(),
        total: cart.total(),
        idempotency_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{Product, ProductCategory};

    fn product(id: &str, name: &str, price: i64) -> Product {
        Product {
            id: id.into(),
            name: name.into(),
            price: Decimal::from(price),
            category: ProductCategory::Food,
        }
    }

    fn filled_cart() -> Cart {
        let mut cart = Cart::new();
        let geprek = product("p1", "Ayam Geprek", 10000);
        cart.add_item(&geprek);
        cart.add_item(&geprek);
        cart.add_item(&product("p2", "Nasi Goreng", 15000));
        cart
    }

    #[test]
    fn test_empty_cart_is_incomplete() {
        let result = build(&Cart::new(), &BuyerContext::pickup("pm1"));
        assert_eq!(result, Err(ValidationError::IncompleteTransaction));
    }

    #[test]
    fn test_missing_payment_method_is_incomplete() {
        let result = build(&filled_cart(), &BuyerContext::default());
        assert_eq!(result, Err(ValidationError::IncompleteTransaction));

        let blank = BuyerContext::pickup("  ");
        assert_eq!(
            build(&filled_cart(), &blank),
            Err(ValidationError::IncompleteTransaction)
        );
    }

    #[test]
    fn test_incomplete_is_reported_before_missing_name() {
        let buyer = BuyerContext {
            delivery_type: DeliveryType::PreOrder,
            ..BuyerContext::default()
        };
        assert_eq!(
            build(&Cart::new(), &buyer),
            Err(ValidationError::IncompleteTransaction)
        );
    }

    #[test]
    fn test_pre_order_requires_buyer_name() {
        let buyer = BuyerContext::pre_order("   ", false, "pm1");
        assert_eq!(
            build(&filled_cart(), &buyer),
            Err(ValidationError::MissingBuyerName)
        );
    }

    #[test]
    fn test_pickup_is_paid_walk_in() {
        let mut buyer = BuyerContext::pickup("pm1");
        // Leftover form values are ignored for pickups
        buyer.buyer_name = "Budi".into();
        buyer.is_paid = false;

        let tx = build(&filled_cart(), &buyer).unwrap();

        assert_eq!(tx.buyer_name, WALK_IN_BUYER);
        assert_eq!(tx.payment_status, PaymentStatus::Paid);
        assert_eq!(tx.delivery_type, DeliveryType::Pickup);
        assert_eq!(tx.total, Decimal::from(35000));
        assert_eq!(tx.items.len(), 2);
        assert_eq!(tx.items[0].quantity, 2);
    }

    #[test]
    fn test_pre_order_keeps_trimmed_name_and_status() {
        let buyer = BuyerContext::pre_order("  Siti  ", false, "pm2");
        let tx = build(&filled_cart(), &buyer).unwrap();

        assert_eq!(tx.buyer_name, "Siti");
        assert_eq!(tx.payment_status, PaymentStatus::Pending);
        assert_eq!(tx.payment_method_id, "pm2");
    }

    #[test]
    fn test_build_is_deterministic_with_explicit_stamp() {
        let cart = filled_cart();
        let buyer = BuyerContext::pickup("pm1");
        let at = Utc::now();

        let first = build_at(&cart, &buyer, at, "k".into()).unwrap();
        let second = build_at(&cart, &buyer, at, "k".into()).unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.total(), Decimal::from(35000));
    }

    #[test]
    fn test_limits() {
        let buyer = BuyerContext::pre_order("x".repeat(MAX_NAME_LEN + 1), true, "pm1");
        assert!(matches!(
            build(&filled_cart(), &buyer),
            Err(ValidationError::FieldTooLong { .. })
        ));

        let mut cart = filled_cart();
        cart.set_quantity(0, i64::from(MAX_QUANTITY) + 1).unwrap();
        assert!(matches!(
            build(&cart, &BuyerContext::pickup("pm1")),
            Err(ValidationError::QuantityOutOfRange { quantity, .. }) if quantity == MAX_QUANTITY + 1
        ));
    }
}
