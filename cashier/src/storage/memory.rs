//! In-memory backend
//!
//! Keeps products, payment methods and transactions in process memory. Used
//! by the test suites and for offline demos; behaves like the remote backend
//! for everything the cashier core depends on, including idempotent
//! transaction creation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use shared::models::{
    NewTransaction, PaymentMethod, PaymentMethodCreate, PaymentMethodUpdate, PaymentStatus,
    Product, ProductCreate, ProductUpdate, Transaction,
};

use super::{RepoError, RepoResult};
use crate::catalog::CatalogRepository;
use crate::transactions::{PersistedTransaction, TransactionRepository};

#[derive(Debug, Default)]
struct State {
    products: Vec<Product>,
    payment_methods: Vec<PaymentMethod>,
    transactions: Vec<Transaction>,
    /// idempotency key -> transaction id
    by_key: HashMap<String, String>,
}

#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: Mutex<State>,
    sequence: AtomicU64,
    /// Number of upcoming write calls that fail as if the network dropped
    failing_writes: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a product
    pub fn with_product(self, product: ProductCreate) -> Self {
        let id = self.next_id();
        self.state.lock().products.push(Product {
            id,
            name: product.name,
            price: product.price,
            category: product.category,
        });
        self
    }

    /// Seed a payment method
    pub fn with_payment_method(self, name: impl Into<String>) -> Self {
        let id = self.next_id();
        self.state.lock().payment_methods.push(PaymentMethod {
            id,
            name: name.into(),
        });
        self
    }

    /// Make the next `count` write calls fail with [`RepoError::Unavailable`]
    pub fn fail_next_writes(&self, count: usize) {
        self.failing_writes.store(count, Ordering::SeqCst);
    }

    /// Number of stored transactions
    pub fn transaction_count(&self) -> usize {
        self.state.lock().transactions.len()
    }

    /// Hex ids shaped like the remote backend's object ids
    fn next_id(&self) -> String {
        format!("{:024x}", self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn check_write(&self) -> RepoResult<()> {
        let injected = self
            .failing_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        match injected {
            Ok(_) => Err(RepoError::Unavailable("connection reset".into())),
            Err(_) => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogRepository for InMemoryBackend {
    async fn list_products(&self) -> RepoResult<Vec<Product>> {
        Ok(self.state.lock().products.clone())
    }

    async fn create_product(&self, data: &ProductCreate) -> RepoResult<Product> {
        self.check_write()?;
        let product = Product {
            id: self.next_id(),
            name: data.name.clone(),
            price: data.price,
            category: data.category,
        };
        self.state.lock().products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: &str, data: &ProductUpdate) -> RepoResult<Product> {
        self.check_write()?;
        let mut state = self.state.lock();
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| RepoError::NotFound(format!("product {id}")))?;
        product.name = data.name.clone();
        product.price = data.price;
        product.category = data.category;
        Ok(product.clone())
    }

    async fn delete_product(&self, id: &str) -> RepoResult<()> {
        self.check_write()?;
        let mut state = self.state.lock();
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        if state.products.len() == before {
            return Err(RepoError::NotFound(format!("product {id}")));
        }
        Ok(())
    }

    async fn list_payment_methods(&self) -> RepoResult<Vec<PaymentMethod>> {
        Ok(self.state.lock().payment_methods.clone())
    }

    async fn create_payment_method(&self, data: &PaymentMethodCreate) -> RepoResult<PaymentMethod> {
        self.check_write()?;
        let method = PaymentMethod {
            id: self.next_id(),
            name: data.name.clone(),
        };
        self.state.lock().payment_methods.push(method.clone());
        Ok(method)
    }

    async fn update_payment_method(
        &self,
        id: &str,
        data: &PaymentMethodUpdate,
    ) -> RepoResult<PaymentMethod> {
        self.check_write()?;
        let mut state = self.state.lock();
        let method = state
            .payment_methods
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| RepoError::NotFound(format!("payment method {id}")))?;
        method.name = data.name.clone();
        Ok(method.clone())
    }

    async fn delete_payment_method(&self, id: &str) -> RepoResult<()> {
        self.check_write()?;
        let mut state = self.state.lock();
        let before = state.payment_methods.len();
        state.payment_methods.retain(|m| m.id != id);
        if state.payment_methods.len() == before {
            return Err(RepoError::NotFound(format!("payment method {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionRepository for InMemoryBackend {
    async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> RepoResult<PersistedTransaction> {
        self.check_write()?;
        let mut state = self.state.lock();

        if let Some(id) = state.by_key.get(&transaction.idempotency_key)
            && let Some(existing) = state.transactions.iter().find(|tx| &tx.id == id)
        {
            tracing::debug!(transaction_id = %existing.id, "Duplicate submission ignored");
            return Ok(PersistedTransaction {
                id: existing.id.clone(),
                created_at: Some(existing.created_at),
                total: Some(existing.total),
            });
        }

        let method_name = state
            .payment_methods
            .iter()
            .find(|m| m.id == transaction.payment_method_id)
            .map(|m| m.name.clone())
            .ok_or_else(|| {
                RepoError::Validation(format!(
                    "unknown payment method {}",
                    transaction.payment_method_id
                ))
            })?;

        let stored = transaction
            .clone()
            .into_transaction(self.next_id(), Utc::now(), method_name);
        let persisted = PersistedTransaction {
            id: stored.id.clone(),
            created_at: Some(stored.created_at),
            total: Some(stored.total),
        };
        state
            .by_key
            .insert(transaction.idempotency_key.clone(), stored.id.clone());
        state.transactions.push(stored);
        Ok(persisted)
    }

    async fn list_transactions(&self) -> RepoResult<Vec<Transaction>> {
        Ok(self.state.lock().transactions.clone())
    }

    async fn patch_payment_status(&self, id: &str, status: PaymentStatus) -> RepoResult<()> {
        self.check_write()?;
        let mut state = self.state.lock();
        let transaction = state
            .transactions
            .iter_mut()
            .find(|tx| tx.id == id)
            .ok_or_else(|| RepoError::NotFound(format!("transaction {id}")))?;
        transaction.payment_status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{DeliveryType, ProductCategory, TransactionItem, WALK_IN_BUYER};

    fn backend() -> InMemoryBackend {
        InMemoryBackend::new()
            .with_product(ProductCreate {
                name: "Kopi".into(),
                price: Decimal::from(8000),
                category: ProductCategory::Drink,
            })
            .with_payment_method("Tunai")
    }

    async fn new_transaction(backend: &InMemoryBackend, key: &str) -> NewTransaction {
        let product = backend.list_products().await.unwrap().remove(0);
        let method = backend.list_payment_methods().await.unwrap().remove(0);
        NewTransaction {
            created_at: Utc::now(),
            buyer_name: WALK_IN_BUYER.into(),
            delivery_type: DeliveryType::Pickup,
            payment_status: PaymentStatus::Paid,
            payment_method_id: method.id,
            items: vec![TransactionItem {
                product_id: product.id,
                name: product.name,
                price: product.price,
                quantity: 2,
            }],
            total: Decimal::from(16000),
            idempotency_key: key.into(),
        }
    }

    #[tokio::test]
    async fn test_create_is_idempotent_per_key() {
        let backend = backend();
        let tx = new_transaction(&backend, "key-1").await;

        let first = backend.create_transaction(&tx).await.unwrap();
        let second = backend.create_transaction(&tx).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(backend.transaction_count(), 1);

        let other = new_transaction(&backend, "key-2").await;
        backend.create_transaction(&other).await.unwrap();
        assert_eq!(backend.transaction_count(), 2);
    }

    #[tokio::test]
    async fn test_listed_transaction_resolves_method_name() {
        let backend = backend();
        let tx = new_transaction(&backend, "key-1").await;
        backend.create_transaction(&tx).await.unwrap();

        let listed = backend.list_transactions().await.unwrap();
        assert_eq!(listed[0].payment_method.name, "Tunai");
        assert_eq!(listed[0].total, Decimal::from(16000));
    }

    #[tokio::test]
    async fn test_unknown_payment_method_is_rejected() {
        let backend = backend();
        let mut tx = new_transaction(&backend, "key-1").await;
        tx.payment_method_id = "missing".into();

        assert!(matches!(
            backend.create_transaction(&tx).await,
            Err(RepoError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_injected_failures_are_consumed() {
        let backend = backend();
        let tx = new_transaction(&backend, "key-1").await;
        backend.fail_next_writes(1);

        assert!(matches!(
            backend.create_transaction(&tx).await,
            Err(RepoError::Unavailable(_))
        ));
        assert_eq!(backend.transaction_count(), 0);
        assert!(backend.create_transaction(&tx).await.is_ok());
    }

    #[tokio::test]
    async fn test_patch_unknown_transaction() {
        let backend = backend();
        assert!(matches!(
            backend.patch_payment_status("t404", PaymentStatus::Paid).await,
            Err(RepoError::NotFound(_))
        ));
    }
}
