//! Catalog Store - products and payment methods with in-memory caching
//!
//! Reads are served from the cache. Writes go to the repository first and
//! only touch the cache once the repository accepted them.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::models::{
    PaymentMethod, PaymentMethodCreate, PaymentMethodUpdate, Product, ProductCategory,
    ProductCreate, ProductUpdate,
};
use thiserror::Error;

use super::CatalogRepository;
use crate::core::{CashierError, CashierResult, Resource};
use crate::utils::validation::{MAX_NAME_LEN, validate_price, validate_required_text};

// =============================================================================
// Types
// =============================================================================

/// Category tab of the product grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Food,
    Drink,
}

impl CategoryFilter {
    pub fn matches(self, category: ProductCategory) -> bool {
        match self {
            Self::All => true,
            Self::Food => category == ProductCategory::Food,
            Self::Drink => category == ProductCategory::Drink,
        }
    }
}

impl From<ProductCategory> for CategoryFilter {
    fn from(category: ProductCategory) -> Self {
        match category {
            ProductCategory::Food => Self::Food,
            ProductCategory::Drink => Self::Drink,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category filter: {0} (expected all, food or drink)")]
pub struct UnknownCategoryFilter(pub String);

impl FromStr for CategoryFilter {
    type Err = UnknownCategoryFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") || s.trim().eq_ignore_ascii_case("semua") {
            return Ok(Self::All);
        }
        s.parse::<ProductCategory>()
            .map(Self::from)
            .map_err(|_| UnknownCategoryFilter(s.trim().to_string()))
    }
}

// =============================================================================
// CatalogStore
// =============================================================================

#[derive(Clone)]
pub struct CatalogStore {
    repo: Arc<dyn CatalogRepository>,
    /// Products in backend order
    products: Arc<RwLock<Vec<Product>>>,
    /// Payment methods in backend order
    payment_methods: Arc<RwLock<Vec<PaymentMethod>>>,
}

impl fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogStore")
            .field("products_count", &self.products.read().len())
            .field("payment_methods_count", &self.payment_methods.read().len())
            .finish()
    }
}

impl CatalogStore {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self {
            repo,
            products: Arc::new(RwLock::new(Vec::new())),
            payment_methods: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Reload both lists from the repository
    ///
    /// On failure the previous cache stays in place.
    pub async fn refresh(&self) -> CashierResult<()> {
        let products = self.repo.list_products().await?;
        let methods = self.repo.list_payment_methods().await?;

        tracing::info!(
            products = products.len(),
            payment_methods = methods.len(),
            "Catalog loaded"
        );

        *self.products.write() = products;
        *self.payment_methods.write() = methods;
        Ok(())
    }

    // ========== Products ==========

    pub fn products(&self) -> Vec<Product> {
        self.products.read().clone()
    }

    pub fn product(&self, id: &str) -> Option<Product> {
        self.products.read().iter().find(|p| p.id == id).cloned()
    }

    /// Case-insensitive name search within a category tab
    pub fn search_products(&self, text: &str, filter: CategoryFilter) -> Vec<Product> {
        let needle = text.trim().to_lowercase();
        self.products
            .read()
            .iter()
            .filter(|p| filter.matches(p.category))
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub async fn create_product(&self, data: ProductCreate) -> CashierResult<Product> {
        let data = ProductCreate {
            name: data.name.trim().to_string(),
            ..data
        };
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_price(data.price)?;

        let product = self.repo.create_product(&data).await?;
        tracing::info!(product_id = %product.id, name = %product.name, "Product created");
        self.products.write().push(product.clone());
        Ok(product)
    }

    pub async fn update_product(&self, id: &str, data: ProductUpdate) -> CashierResult<Product> {
        let data = ProductUpdate {
            name: data.name.trim().to_string(),
            ..data
        };
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_price(data.price)?;

        let product = self
            .repo
            .update_product(id, &data)
            .await
            .map_err(|e| CashierError::from_repo(e, Resource::Product, id))?;

        let mut products = self.products.write();
        match products.iter_mut().find(|p| p.id == id) {
            Some(cached) => *cached = product.clone(),
            None => products.push(product.clone()),
        }
        tracing::info!(product_id = %id, "Product updated");
        Ok(product)
    }

    pub async fn delete_product(&self, id: &str) -> CashierResult<()> {
        self.repo
            .delete_product(id)
            .await
            .map_err(|e| CashierError::from_repo(e, Resource::Product, id))?;
        self.products.write().retain(|p| p.id != id);
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }

    // ========== Payment methods ==========

    pub fn payment_methods(&self) -> Vec<PaymentMethod> {
        self.payment_methods.read().clone()
    }

    pub fn payment_method(&self, id: &str) -> Option<PaymentMethod> {
        self.payment_methods
            .read()
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    pub async fn create_payment_method(
        &self,
        data: PaymentMethodCreate,
    ) -> CashierResult<PaymentMethod> {
        let data = PaymentMethodCreate {
            name: data.name.trim().to_string(),
        };
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;

        let method = self.repo.create_payment_method(&data).await?;
        tracing::info!(payment_method_id = %method.id, name = %method.name, "Payment method created");
        self.payment_methods.write().push(method.clone());
        Ok(method)
    }

    pub async fn update_payment_method(
        &self,
        id: &str,
        data: PaymentMethodUpdate,
    ) -> CashierResult<PaymentMethod> {
        let data = PaymentMethodUpdate {
            name: data.name.trim().to_string(),
        };
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;

        let method = self
            .repo
            .update_payment_method(id, &data)
            .await
            .map_err(|e| CashierError::from_repo(e, Resource::PaymentMethod, id))?;

        let mut methods = self.payment_methods.write();
        match methods.iter_mut().find(|m| m.id == id) {
            Some(cached) => *cached = method.clone(),
            None => methods.push(method.clone()),
        }
        Ok(method)
    }

    pub async fn delete_payment_method(&self, id: &str) -> CashierResult<()> {
        self.repo
            .delete_payment_method(id)
            .await
            .map_err(|e| CashierError::from_repo(e, Resource::PaymentMethod, id))?;
        self.payment_methods.write().retain(|m| m.id != id);
        tracing::info!(payment_method_id = %id, "Payment method deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryBackend;
    use rust_decimal::Decimal;

    fn create_test_product(name: &str, price: i64, category: ProductCategory) -> ProductCreate {
        ProductCreate {
            name: name.to_string(),
            price: Decimal::from(price),
            category,
        }
    }

    async fn seeded_store() -> CatalogStore {
        let backend = Arc::new(InMemoryBackend::new());
        let store = CatalogStore::new(backend);
        for (name, price, category) in [
            ("Nasi Goreng", 15000, ProductCategory::Food),
            ("Ayam Geprek", 10000, ProductCategory::Food),
            ("Es Teh", 5000, ProductCategory::Drink),
            ("Kopi Susu", 18000, ProductCategory::Drink),
        ] {
            store
                .create_product(create_test_product(name, price, category))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_search_by_name_and_category() {
        let store = seeded_store().await;

        assert_eq!(store.search_products("", CategoryFilter::All).len(), 4);
        assert_eq!(store.search_products("", CategoryFilter::Drink).len(), 2);

        let found = store.search_products("GORENG", CategoryFilter::All);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Nasi Goreng");

        assert!(store.search_products("goreng", CategoryFilter::Drink).is_empty());
    }

    #[tokio::test]
    async fn test_create_validates_before_writing() {
        let store = seeded_store().await;

        let err = store
            .create_product(create_test_product("  ", 1000, ProductCategory::Food))
            .await
            .unwrap_err();
        assert!(matches!(err, CashierError::InvalidInput { field: "name", .. }));

        let err = store
            .create_product(create_test_product("Roti", -5, ProductCategory::Food))
            .await
            .unwrap_err();
        assert!(matches!(err, CashierError::InvalidInput { field: "price", .. }));

        assert_eq!(store.products().len(), 4);
    }

    #[tokio::test]
    async fn test_update_and_delete_write_through() {
        let store = seeded_store().await;
        let teh = store.search_products("es teh", CategoryFilter::All).remove(0);

        let updated = store
            .update_product(
                &teh.id,
                ProductUpdate {
                    name: " Es Teh Manis ".into(),
                    price: Decimal::from(6000),
                    category: ProductCategory::Drink,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Es Teh Manis");
        assert_eq!(store.product(&teh.id).unwrap().price, Decimal::from(6000));

        store.delete_product(&teh.id).await.unwrap();
        assert!(store.product(&teh.id).is_none());

        let err = store.delete_product(&teh.id).await.unwrap_err();
        assert!(matches!(
            err,
            CashierError::NotFound {
                resource: Resource::Product,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_refresh_reloads_from_repository() {
        let backend = Arc::new(InMemoryBackend::new());
        let writer = CatalogStore::new(backend.clone());
        writer
            .create_payment_method(PaymentMethodCreate { name: "QRIS".into() })
            .await
            .unwrap();

        let reader = CatalogStore::new(backend);
        assert!(reader.payment_methods().is_empty());
        reader.refresh().await.unwrap();
        assert_eq!(reader.payment_methods()[0].name, "QRIS");
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!("makanan".parse::<CategoryFilter>(), Ok(CategoryFilter::Food));
        assert_eq!("Drink".parse::<CategoryFilter>(), Ok(CategoryFilter::Drink));
        assert!("dessert".parse::<CategoryFilter>().is_err());
    }
}
