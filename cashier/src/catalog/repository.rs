//! Catalog persistence boundary

use async_trait::async_trait;
use shared::models::{
    PaymentMethod, PaymentMethodCreate, PaymentMethodUpdate, Product, ProductCreate,
    ProductUpdate,
};

use crate::storage::RepoResult;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_products(&self) -> RepoResult<Vec<Product>>;
    async fn create_product(&self, data: &ProductCreate) -> RepoResult<Product>;
    async fn update_product(&self, id: &str, data: &ProductUpdate) -> RepoResult<Product>;
    async fn delete_product(&self, id: &str) -> RepoResult<()>;

    async fn list_payment_methods(&self) -> RepoResult<Vec<PaymentMethod>>;
    async fn create_payment_method(&self, data: &PaymentMethodCreate) -> RepoResult<PaymentMethod>;
    async fn update_payment_method(
        &self,
        id: &str,
        data: &PaymentMethodUpdate,
    ) -> RepoResult<PaymentMethod>;
    async fn delete_payment_method(&self, id: &str) -> RepoResult<()>;
}
