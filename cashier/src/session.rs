//! Cashier Session
//!
//! One cashier at one till: the cart, the buyer form, the catalog cache and
//! the transaction ledger, plus the repositories they persist through.
//!
//! `submit` is the only path from cart to ledger. It either records the
//! transaction and clears the cart and form together, or changes nothing.
//! Each unchanged cart keeps one idempotency key across submit attempts, so
//! retrying after a timeout cannot record the sale twice.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use shared::models::{DeliveryType, PaymentStatus, Product, Transaction};

use crate::cart::Cart;
use crate::catalog::{CatalogRepository, CatalogStore};
use crate::core::{CashierError, CashierResult, Resource};
use crate::transactions::{
    BuyerContext, Ledger, LedgerQuery, TransactionRepository, build_at,
};

pub struct CashierSession {
    catalog: CatalogStore,
    transactions: Arc<dyn TransactionRepository>,
    ledger: Ledger,
    cart: Cart,
    buyer: BuyerContext,
    /// Idempotency key of the current cart and form; dropped on any change
    pending_key: Option<String>,
    tz: Tz,
}

impl std::fmt::Debug for CashierSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CashierSession")
            .field("catalog", &self.catalog)
            .field("ledger_len", &self.ledger.len())
            .field("cart_lines", &self.cart.len())
            .field("tz", &self.tz)
            .finish()
    }
}

impl CashierSession {
    /// Session over a backend that serves both catalog and transactions
    pub fn new<B>(backend: Arc<B>, tz: Tz) -> Self
    where
        B: CatalogRepository + TransactionRepository + 'static,
    {
        Self::with_repositories(backend.clone(), backend, tz)
    }

    pub fn with_repositories(
        catalog: Arc<dyn CatalogRepository>,
        transactions: Arc<dyn TransactionRepository>,
        tz: Tz,
    ) -> Self {
        Self {
            catalog: CatalogStore::new(catalog),
            transactions,
            ledger: Ledger::new(),
            cart: Cart::new(),
            buyer: BuyerContext::default(),
            pending_key: None,
            tz,
        }
    }

    /// Load catalog and transaction history from the backend
    pub async fn load(&mut self) -> CashierResult<()> {
        self.catalog.refresh().await?;
        self.refresh_transactions().await?;
        Ok(())
    }

    /// Replace the ledger with the backend's copy
    pub async fn refresh_transactions(&mut self) -> CashierResult<usize> {
        let transactions = self.transactions.list_transactions().await?;
        let count = transactions.len();
        self.ledger.replace_all(transactions);
        tracing::info!(count, "Transaction history loaded");
        Ok(count)
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn buyer(&self) -> &BuyerContext {
        &self.buyer
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    // ========== Cart ==========

    /// Add one unit of a catalog product by id
    pub fn add_product(&mut self, product_id: &str) -> CashierResult<()> {
        let product = self
            .catalog
            .product(product_id)
            .ok_or_else(|| CashierError::not_found(Resource::Product, product_id))?;
        self.add_item(&product);
        Ok(())
    }

    pub fn add_item(&mut self, product: &Product) {
        self.cart.add_item(product);
        self.invalidate_key();
    }

    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> CashierResult<()> {
        self.cart.set_quantity(index, quantity)?;
        self.invalidate_key();
        Ok(())
    }

    pub fn increment(&mut self, index: usize) -> CashierResult<()> {
        self.cart.increment(index)?;
        self.invalidate_key();
        Ok(())
    }

    pub fn decrement(&mut self, index: usize) -> CashierResult<()> {
        self.cart.decrement(index)?;
        self.invalidate_key();
        Ok(())
    }

    pub fn remove_line(&mut self, index: usize) -> CashierResult<()> {
        self.cart.remove_line(index)?;
        self.invalidate_key();
        Ok(())
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.invalidate_key();
    }

    // ========== Buyer form ==========

    pub fn set_delivery_type(&mut self, delivery_type: DeliveryType) {
        self.buyer.delivery_type = delivery_type;
        self.invalidate_key();
    }

    pub fn set_buyer_name(&mut self, name: impl Into<String>) {
        self.buyer.buyer_name = name.into();
        self.invalidate_key();
    }

    pub fn set_paid(&mut self, is_paid: bool) {
        self.buyer.is_paid = is_paid;
        self.invalidate_key();
    }

    /// Select a payment method known to the catalog
    pub fn select_payment_method(&mut self, id: &str) -> CashierResult<()> {
        if self.catalog.payment_method(id).is_none() {
            return Err(CashierError::not_found(Resource::PaymentMethod, id));
        }
        self.buyer.payment_method_id = Some(id.to_string());
        self.invalidate_key();
        Ok(())
    }

    fn invalidate_key(&mut self) {
        self.pending_key = None;
    }

    // ========== Submission ==========

    /// Validate, persist and record the current cart
    ///
    /// On success the transaction is in the ledger and the cart and form are
    /// reset. On any error nothing local changes; calling `submit` again
    /// resends the same idempotency key.
    pub async fn submit(&mut self) -> CashierResult<Transaction> {
        let key = self
            .pending_key
            .get_or_insert_with(shared::util::idempotency_key)
            .clone();
        let new_tx = build_at(&self.cart, &self.buyer, Utc::now(), key)?;

        let method_name = self
            .catalog
            .payment_method(&new_tx.payment_method_id)
            .map(|m| m.name)
            .unwrap_or_default();

        let persisted = match self.transactions.create_transaction(&new_tx).await {
            Ok(persisted) => persisted,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    idempotency_key = %new_tx.idempotency_key,
                    "Transaction submission failed, cart kept"
                );
                return Err(e.into());
            }
        };

        if let Some(remote_total) = persisted.total
            && remote_total != new_tx.total
        {
            tracing::warn!(
                transaction_id = %persisted.id,
                local_total = %new_tx.total,
                remote_total = %remote_total,
                "Backend total differs from submitted total"
            );
        }

        let created_at = persisted.created_at.unwrap_or(new_tx.created_at);
        let transaction = new_tx.into_transaction(persisted.id, created_at, method_name);
        self.ledger.append(transaction.clone());

        self.cart.clear();
        self.buyer.reset();
        self.pending_key = None;

        tracing::info!(
            transaction_id = %transaction.id,
            total = %transaction.total,
            delivery_type = ?transaction.delivery_type,
            "Transaction submitted"
        );
        Ok(transaction)
    }

    // ========== Reconciliation ==========

    /// Persist a new payment status, then patch the ledger
    pub async fn set_payment_status(
        &mut self,
        id: &str,
        status: PaymentStatus,
    ) -> CashierResult<Transaction> {
        if self.ledger.get(id).is_none() {
            return Err(CashierError::not_found(Resource::Transaction, id));
        }

        self.transactions
            .patch_payment_status(id, status)
            .await
            .map_err(|e| CashierError::from_repo(e, Resource::Transaction, id))?;

        let updated = self.ledger.set_payment_status(id, status)?.clone();
        tracing::info!(transaction_id = %id, status = %status, "Payment status updated");
        Ok(updated)
    }

    /// Flip Paid and Pending
    pub async fn toggle_payment_status(&mut self, id: &str) -> CashierResult<Transaction> {
        let current = self
            .ledger
            .get(id)
            .map(|tx| tx.payment_status)
            .ok_or_else(|| CashierError::not_found(Resource::Transaction, id))?;
        let next = match current {
            PaymentStatus::Paid => PaymentStatus::Pending,
            PaymentStatus::Pending => PaymentStatus::Paid,
        };
        self.set_payment_status(id, next).await
    }

    // ========== History ==========

    /// Ledger records matching `query`, newest first
    pub fn history(&self, query: &LedgerQuery) -> Vec<&Transaction> {
        self.history_at(query, Utc::now())
    }

    pub fn history_at(&self, query: &LedgerQuery, now: DateTime<Utc>) -> Vec<&Transaction> {
        self.ledger.query(query, now, self.tz)
    }
}
