//! Wire types of the cashier backend
//!
//! The backend speaks Indonesian field names and Mongo-style `_id`s. These
//! types mirror that shape exactly and convert into the shared models, so
//! nothing outside this module sees backend naming.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{
    DeliveryType, NewTransaction, PaymentMethod, PaymentMethodRef, PaymentStatus, Product,
    ProductCategory, Transaction, TransactionItem, WALK_IN_BUYER,
};

/// Item name used when the referenced product no longer exists
pub const DELETED_PRODUCT_NAME: &str = "(deleted product)";

/// Method name used when the referenced payment method no longer exists
pub const DELETED_PAYMENT_METHOD_NAME: &str = "(deleted payment method)";

// =============================================================================
// Enums
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiCategory {
    Makanan,
    Minuman,
}

impl From<ProductCategory> for ApiCategory {
    fn from(category: ProductCategory) -> Self {
        match category {
            ProductCategory::Food => Self::Makanan,
            ProductCategory::Drink => Self::Minuman,
        }
    }
}

impl From<ApiCategory> for ProductCategory {
    fn from(category: ApiCategory) -> Self {
        match category {
            ApiCategory::Makanan => Self::Food,
            ApiCategory::Minuman => Self::Drink,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiDeliveryType {
    Langsung,
    Preorder,
}

impl From<DeliveryType> for ApiDeliveryType {
    fn from(delivery: DeliveryType) -> Self {
        match delivery {
            DeliveryType::Pickup => Self::Langsung,
            DeliveryType::PreOrder => Self::Preorder,
        }
    }
}

impl From<ApiDeliveryType> for DeliveryType {
    fn from(delivery: ApiDeliveryType) -> Self {
        match delivery {
            ApiDeliveryType::Langsung => Self::Pickup,
            ApiDeliveryType::Preorder => Self::PreOrder,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiPaymentStatus {
    Lunas,
    Pending,
}

impl From<PaymentStatus> for ApiPaymentStatus {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Paid => Self::Lunas,
            PaymentStatus::Pending => Self::Pending,
        }
    }
}

impl From<ApiPaymentStatus> for PaymentStatus {
    fn from(status: ApiPaymentStatus) -> Self {
        match status {
            ApiPaymentStatus::Lunas => Self::Paid,
            ApiPaymentStatus::Pending => Self::Pending,
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// `GET /api/produk` element
#[derive(Debug, Clone, Deserialize)]
pub struct ApiProduct {
    #[serde(rename = "_id")]
    pub id: String,
    pub nama_produk: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub harga: Decimal,
    pub kategori: ApiCategory,
}

impl From<ApiProduct> for Product {
    fn from(p: ApiProduct) -> Self {
        Product {
            id: p.id,
            name: p.nama_produk,
            price: p.harga,
            category: p.kategori.into(),
        }
    }
}

/// `POST /api/produk` and `PUT /api/produk/{id}` body
#[derive(Debug, Clone, Serialize)]
pub struct ProductBody {
    pub nama_produk: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub harga: Decimal,
    pub kategori: ApiCategory,
}

impl ProductBody {
    pub fn new(name: &str, price: Decimal, category: ProductCategory) -> Self {
        Self {
            nama_produk: name.to_string(),
            harga: price,
            kategori: category.into(),
        }
    }
}

/// `GET /api/jenis-pembayaran` element
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPaymentMethod {
    #[serde(rename = "_id")]
    pub id: String,
    pub nama_pembayaran: String,
}

impl From<ApiPaymentMethod> for PaymentMethod {
    fn from(m: ApiPaymentMethod) -> Self {
        PaymentMethod {
            id: m.id,
            name: m.nama_pembayaran,
        }
    }
}

/// `POST /api/jenis-pembayaran` and `PUT /api/jenis-pembayaran/{id}` body
#[derive(Debug, Clone, Serialize)]
pub struct PaymentMethodBody {
    pub nama_pembayaran: String,
}

// =============================================================================
// Transactions
// =============================================================================

/// Product reference inside a transaction line
///
/// Populated on list endpoints, a bare id on write echoes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiProductField {
    Populated(ApiProductRef),
    Id(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiProductRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub nama_produk: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub harga: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiTransactionItem {
    /// `null` when the product was deleted after the sale
    #[serde(default)]
    pub produk: Option<ApiProductField>,
    pub jumlah: u32,
}

impl From<ApiTransactionItem> for TransactionItem {
    fn from(item: ApiTransactionItem) -> Self {
        match item.produk {
            Some(ApiProductField::Populated(p)) => TransactionItem {
                product_id: p.id,
                name: p.nama_produk,
                price: p.harga,
                quantity: item.jumlah,
            },
            Some(ApiProductField::Id(id)) => TransactionItem {
                product_id: id,
                name: DELETED_PRODUCT_NAME.to_string(),
                price: Decimal::ZERO,
                quantity: item.jumlah,
            },
            None => TransactionItem {
                product_id: String::new(),
                name: DELETED_PRODUCT_NAME.to_string(),
                price: Decimal::ZERO,
                quantity: item.jumlah,
            },
        }
    }
}

/// Payment method reference inside a transaction
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiPaymentMethodField {
    Populated(ApiPaymentMethod),
    Id(String),
}

impl From<ApiPaymentMethodField> for PaymentMethodRef {
    fn from(field: ApiPaymentMethodField) -> Self {
        match field {
            ApiPaymentMethodField::Populated(m) => PaymentMethodRef {
                id: m.id,
                name: m.nama_pembayaran,
            },
            ApiPaymentMethodField::Id(id) => PaymentMethodRef {
                id,
                name: DELETED_PAYMENT_METHOD_NAME.to_string(),
            },
        }
    }
}

/// `GET /api/transaksi` element
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTransaction {
    #[serde(rename = "_id")]
    pub id: String,
    pub tanggal: DateTime<Utc>,
    #[serde(default)]
    pub pembeli: Option<String>,
    pub tipe: ApiDeliveryType,
    pub status: ApiPaymentStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(default)]
    pub jenis_pembayaran: Option<ApiPaymentMethodField>,
    #[serde(default)]
    pub produk: Vec<ApiTransactionItem>,
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

impl From<ApiTransaction> for Transaction {
    fn from(t: ApiTransaction) -> Self {
        let payment_method = t
            .jenis_pembayaran
            .map(PaymentMethodRef::from)
            .unwrap_or_else(|| PaymentMethodRef {
                id: String::new(),
                name: DELETED_PAYMENT_METHOD_NAME.to_string(),
            });

        let buyer_name = t
            .pembeli
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| WALK_IN_BUYER.to_string());

        Transaction {
            id: t.id,
            created_at: t.tanggal,
            buyer_name,
            delivery_type: t.tipe.into(),
            payment_status: t.status.into(),
            payment_method,
            items: t.produk.into_iter().map(TransactionItem::from).collect(),
            total: t.total,
            idempotency_key: t.idempotency_key,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiLineBody {
    pub produk: String,
    pub jumlah: u32,
}

/// `POST /api/transaksi` body
///
/// Only product ids and quantities are sent; names and prices stay local.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTransactionBody {
    pub tanggal: DateTime<Utc>,
    pub tipe: ApiDeliveryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pembeli: Option<String>,
    pub status: ApiPaymentStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub jenis_pembayaran_id: String,
    pub produk: Vec<ApiLineBody>,
}

impl From<&NewTransaction> for CreateTransactionBody {
    fn from(tx: &NewTransaction) -> Self {
        Self {
            tanggal: tx.created_at,
            tipe: tx.delivery_type.into(),
            pembeli: Some(tx.buyer_name.clone()),
            status: tx.payment_status.into(),
            total: tx.total,
            jenis_pembayaran_id: tx.payment_method_id.clone(),
            produk: tx
                .items
                .iter()
                .map(|item| ApiLineBody {
                    produk: item.product_id.clone(),
                    jumlah: item.quantity,
                })
                .collect(),
        }
    }
}

/// What the backend echoes after a create
///
/// Only the identity is required; the rest is used to detect drift.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTransaction {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub tanggal: Option<DateTime<Utc>>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total: Option<Decimal>,
}

/// `PUT /api/transaksi/{id}` body
#[derive(Debug, Clone, Serialize)]
pub struct StatusPatchBody {
    pub status: ApiPaymentStatus,
}
