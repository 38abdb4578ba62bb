//! HTTP backend adapter
//!
//! Implements the repository traits on top of [`cashier_client::HttpClient`].

use async_trait::async_trait;
use cashier_client::{ClientConfig, ClientError, HttpClient};
use shared::models::{
    NewTransaction, PaymentMethod, PaymentMethodCreate, PaymentMethodUpdate, PaymentStatus,
    Product, ProductCreate, ProductUpdate, Transaction,
};

use crate::catalog::CatalogRepository;
use crate::storage::{RepoError, RepoResult};
use crate::transactions::{PersistedTransaction, TransactionRepository};

impl From<ClientError> for RepoError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound(msg) => Self::NotFound(msg),
            ClientError::Validation(msg) => Self::Validation(msg),
            ClientError::Http(e) => Self::Unavailable(e.to_string()),
            other => Self::Backend(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RemoteBackend {
    client: HttpClient,
}

impl RemoteBackend {
    pub fn new(config: &ClientConfig) -> RepoResult<Self> {
        let client = config.build_http_client()?;
        tracing::debug!(base_url = %client.base_url(), "Remote backend configured");
        Ok(Self { client })
    }

    pub fn from_client(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogRepository for RemoteBackend {
    async fn list_products(&self) -> RepoResult<Vec<Product>> {
        Ok(self.client.list_products().await?)
    }

    async fn create_product(&self, data: &ProductCreate) -> RepoResult<Product> {
        Ok(self.client.create_product(data).await?)
    }

    async fn update_product(&self, id: &str, data: &ProductUpdate) -> RepoResult<Product> {
        Ok(self.client.update_product(id, data).await?)
    }

    async fn delete_product(&self, id: &str) -> RepoResult<()> {
        Ok(self.client.delete_product(id).await?)
    }

    async fn list_payment_methods(&self) -> RepoResult<Vec<PaymentMethod>> {
        Ok(self.client.list_payment_methods().await?)
    }

    async fn create_payment_method(&self, data: &PaymentMethodCreate) -> RepoResult<PaymentMethod> {
        Ok(self.client.create_payment_method(data).await?)
    }

    async fn update_payment_method(
        &self,
        id: &str,
        data: &PaymentMethodUpdate,
    ) -> RepoResult<PaymentMethod> {
        Ok(self.client.update_payment_method(id, data).await?)
    }

    async fn delete_payment_method(&self, id: &str) -> RepoResult<()> {
        Ok(self.client.delete_payment_method(id).await?)
    }
}

#[async_trait]
impl TransactionRepository for RemoteBackend {
    async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> RepoResult<PersistedTransaction> {
        let created = self.client.create_transaction(transaction).await?;
        Ok(PersistedTransaction {
            id: created.id,
            created_at: created.tanggal,
            total: created.total,
        })
    }

    async fn list_transactions(&self) -> RepoResult<Vec<Transaction>> {
        Ok(self.client.list_transactions().await?)
    }

    async fn patch_payment_status(&self, id: &str, status: PaymentStatus) -> RepoResult<()> {
        Ok(self.client.update_transaction_status(id, status).await?)
    }
}
