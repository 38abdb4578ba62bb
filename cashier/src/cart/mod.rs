//! Cart Engine
//!
//! The in-progress order: one line per product, each carrying a snapshot of
//! the product's name and price at the moment it was first added. Later
//! catalog edits never reach a line that is already in the cart.

use rust_decimal::Decimal;
use shared::ErrorCode;
use shared::models::{Product, TransactionItem};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Quantity must be at least 1, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    #[error("Quantity must be at most {max}, got {quantity}")]
    QuantityTooLarge { quantity: i64, max: u32 },

    #[error("Cart line {index} does not exist")]
    LineNotFound { index: usize },
}

impl CartError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
            Self::QuantityTooLarge { .. } => ErrorCode::ValueOutOfRange,
            Self::LineNotFound { .. } => ErrorCode::CartLineNotFound,
        }
    }
}

/// One product in the cart
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: String,
    /// Name when the line was created
    pub name: String,
    /// Unit price when the line was created
    pub price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

impl From<&CartLine> for TransactionItem {
    fn from(line: &CartLine) -> Self {
        TransactionItem {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
        }
    }
}

/// Ordered cart lines, at most one per product
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`
    ///
    /// Merges into the existing line for the product, otherwise appends a
    /// new line with quantity 1.
    pub fn add_item(&mut self, product: &Product) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            line.quantity = line.quantity.saturating_add(1);
            return;
        }

        self.lines.push(CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
        });
    }

    /// Replace the quantity of line `index` in place
    ///
    /// Quantities outside `1..=u32::MAX` are rejected and leave the cart unchanged.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> Result<(), CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity { quantity });
        }
        let quantity =
            u32::try_from(quantity).map_err(|_| CartError::QuantityTooLarge {
                quantity,
                max: u32::MAX,
            })?;
        let line = self.line_mut(index)?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn increment(&mut self, index: usize) -> Result<(), CartError> {
        let line = self.line_mut(index)?;
        line.quantity = line.quantity.saturating_add(1);
        Ok(())
    }

    /// Remove one unit; a line at quantity 1 is removed entirely
    pub fn decrement(&mut self, index: usize) -> Result<(), CartError> {
        let line = self.line_mut(index)?;
        if line.quantity > 1 {
            line.quantity -= 1;
            return Ok(());
        }
        self.lines.remove(index);
        Ok(())
    }

    /// Remove line `index`; later lines shift down by one
    pub fn remove_line(&mut self, index: usize) -> Result<CartLine, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::LineNotFound { index });
        }
        Ok(self.lines.remove(index))
    }

    /// Sum of line subtotals, unrounded
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Position and line for a product, if it is in the cart
    pub fn line_for(&self, product_id: &str) -> Option<(usize, &CartLine)> {
        self.lines
            .iter()
            .enumerate()
            .find(|(_, line)| line.product_id == product_id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut CartLine, CartError> {
        self.lines
            .get_mut(index)
            .ok_or(CartError::LineNotFound { index })
    }
}
