//! HTTP client for the cashier backend

use crate::dto::{
    ApiPaymentMethod, ApiProduct, ApiTransaction, CreateTransactionBody, CreatedTransaction,
    PaymentMethodBody, ProductBody, StatusPatchBody,
};
use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::ErrorCode;
use shared::models::{
    NewTransaction, PaymentMethod, PaymentMethodCreate, PaymentMethodUpdate, PaymentStatus,
    Product, ProductCreate, ProductUpdate, Transaction,
};

/// Header carrying the client-generated submission token
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

const PRODUCTS: &str = "api/produk";
const PAYMENT_METHODS: &str = "api/jenis-pembayaran";
const TRANSACTIONS: &str = "api/transaksi";

/// HTTP client for making network requests to the cashier backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.client.get(self.url(path));
        Self::send(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.client.post(self.url(path)).json(body);
        Self::send(request).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.client.put(self.url(path)).json(body);
        Self::send(request).await
    }

    /// Make a DELETE request, discarding the response body
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self.client.delete(self.url(path)).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }

    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let text = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), url = %url, "Backend request failed");

        Err(match ErrorCode::from_http_status(status) {
            ErrorCode::NotFound => ClientError::NotFound(if text.is_empty() { url } else { text }),
            ErrorCode::ValidationFailed => ClientError::Validation(text),
            _ => ClientError::Server {
                status: status.as_u16(),
                body: text,
            },
        })
    }

    // ========== Product API ==========

    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        let products: Vec<ApiProduct> = self.get(PRODUCTS).await?;
        tracing::debug!(count = products.len(), "Fetched products");
        Ok(products.into_iter().map(Product::from).collect())
    }

    pub async fn create_product(&self, product: &ProductCreate) -> ClientResult<Product> {
        let body = ProductBody::new(&product.name, product.price, product.category);
        let created: ApiProduct = self.post(PRODUCTS, &body).await?;
        Ok(created.into())
    }

    pub async fn update_product(&self, id: &str, product: &ProductUpdate) -> ClientResult<Product> {
        let body = ProductBody::new(&product.name, product.price, product.category);
        let updated: ApiProduct = self.put(&format!("{}/{}", PRODUCTS, id), &body).await?;
        Ok(updated.into())
    }

    pub async fn delete_product(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("{}/{}", PRODUCTS, id)).await
    }

    // ========== Payment Method API ==========

    pub async fn list_payment_methods(&self) -> ClientResult<Vec<PaymentMethod>> {
        let methods: Vec<ApiPaymentMethod> = self.get(PAYMENT_METHODS).await?;
        tracing::debug!(count = methods.len(), "Fetched payment methods");
        Ok(methods.into_iter().map(PaymentMethod::from).collect())
    }

    pub async fn create_payment_method(
        &self,
        method: &PaymentMethodCreate,
    ) -> ClientResult<PaymentMethod> {
        let body = PaymentMethodBody {
            nama_pembayaran: method.name.clone(),
        };
        let created: ApiPaymentMethod = self.post(PAYMENT_METHODS, &body).await?;
        Ok(created.into())
    }

    pub async fn update_payment_method(
        &self,
        id: &str,
        method: &PaymentMethodUpdate,
    ) -> ClientResult<PaymentMethod> {
        let body = PaymentMethodBody {
            nama_pembayaran: method.name.clone(),
        };
        let updated: ApiPaymentMethod = self
            .put(&format!("{}/{}", PAYMENT_METHODS, id), &body)
            .await?;
        Ok(updated.into())
    }

    pub async fn delete_payment_method(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("{}/{}", PAYMENT_METHODS, id)).await
    }

    // ========== Transaction API ==========

    pub async fn list_transactions(&self) -> ClientResult<Vec<Transaction>> {
        let transactions: Vec<ApiTransaction> = self.get(TRANSACTIONS).await?;
        tracing::debug!(count = transactions.len(), "Fetched transactions");
        Ok(transactions.into_iter().map(Transaction::from).collect())
    }

    /// Submit a transaction; the idempotency key travels as a header
    pub async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> ClientResult<CreatedTransaction> {
        let body = CreateTransactionBody::from(transaction);
        let request = self
            .client
            .post(self.url(TRANSACTIONS))
            .header(IDEMPOTENCY_HEADER, &transaction.idempotency_key)
            .json(&body);
        Self::send(request).await
    }

    pub async fn update_transaction_status(
        &self,
        id: &str,
        status: PaymentStatus,
    ) -> ClientResult<()> {
        let body = StatusPatchBody {
            status: status.into(),
        };
        let response = self
            .client
            .put(self.url(&format!("{}/{}", TRANSACTIONS, id)))
            .json(&body)
            .send()
            .await?;
        Self::check_status(response).await.map(|_| ())
    }
}
