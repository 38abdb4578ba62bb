// cashier-client/tests/http_client.rs
// Integration tests against a mock backend

use cashier_client::dto::DELETED_PAYMENT_METHOD_NAME;
use cashier_client::{ClientConfig, ClientError, HttpClient, IDEMPOTENCY_HEADER};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use shared::ErrorCode;
use shared::models::{
    DeliveryType, NewTransaction, PaymentMethodCreate, PaymentStatus, ProductCategory,
    ProductCreate, TransactionItem,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    ClientConfig::new(server.uri())
        .with_timeout_ms(2_000)
        .build_http_client()
        .unwrap()
}

fn sample_new_transaction() -> NewTransaction {
    NewTransaction {
        created_at: Utc::now(),
        buyer_name: "Umum".into(),
        delivery_type: DeliveryType::Pickup,
        payment_status: PaymentStatus::Paid,
        payment_method_id: "pm1".into(),
        items: vec![TransactionItem {
            product_id: "p1".into(),
            name: "Ayam Geprek".into(),
            price: Decimal::from(10000),
            quantity: 2,
        }],
        total: Decimal::from(20000),
        idempotency_key: "key-123".into(),
    }
}

#[tokio::test]
async fn test_list_products_maps_wire_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/produk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "p1", "nama_produk": "Ayam Geprek", "harga": 10000, "kategori": "makanan"},
            {"_id": "p2", "nama_produk": "Es Teh", "harga": 5000, "kategori": "minuman"}
        ])))
        .mount(&server)
        .await;

    let products = client_for(&server).list_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Ayam Geprek");
    assert_eq!(products[0].category, ProductCategory::Food);
    assert_eq!(products[1].price, Decimal::from(5000));
}

#[tokio::test]
async fn test_create_product_sends_backend_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/produk"))
        .and(body_json(json!({
            "nama_produk": "Kopi Susu",
            "harga": 18000.0,
            "kategori": "minuman"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!(
            {"_id": "p9", "nama_produk": "Kopi Susu", "harga": 18000, "kategori": "minuman"}
        )))
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_product(&ProductCreate {
            name: "Kopi Susu".into(),
            price: Decimal::from(18000),
            category: ProductCategory::Drink,
        })
        .await
        .unwrap();

    assert_eq!(created.id, "p9");
}

#[tokio::test]
async fn test_create_payment_method() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/jenis-pembayaran"))
        .and(body_json(json!({"nama_pembayaran": "QRIS"})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"_id": "pm7", "nama_pembayaran": "QRIS"})),
        )
        .mount(&server)
        .await;

    let method = client_for(&server)
        .create_payment_method(&PaymentMethodCreate {
            name: "QRIS".into(),
        })
        .await
        .unwrap();

    assert_eq!(method.id, "pm7");
    assert_eq!(method.name, "QRIS");
}

#[tokio::test]
async fn test_create_transaction_sends_idempotency_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/transaksi"))
        .and(header(IDEMPOTENCY_HEADER, "key-123"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"_id": "t1", "total": 20000})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_transaction(&sample_new_transaction())
        .await
        .unwrap();

    assert_eq!(created.id, "t1");
    assert_eq!(created.total, Some(Decimal::from(20000)));
}

#[tokio::test]
async fn test_list_transactions_resolves_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transaksi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "t1",
            "tanggal": "2026-10-19T02:00:00.000Z",
            "pembeli": "Rina",
            "tipe": "preorder",
            "status": "pending",
            "total": 30000,
            "jenis_pembayaran": {"_id": "pm1", "nama_pembayaran": "Tunai"},
            "produk": [{"produk": {"_id": "p1", "nama_produk": "Bolu", "harga": 15000}, "jumlah": 2}]
        }])))
        .mount(&server)
        .await;

    let transactions = client_for(&server).list_transactions().await.unwrap();

    assert_eq!(transactions.len(), 1);
    let tx = &transactions[0];
    assert_eq!(tx.buyer_name, "Rina");
    assert_eq!(tx.delivery_type, DeliveryType::PreOrder);
    assert_eq!(tx.payment_status, PaymentStatus::Pending);
    assert_eq!(tx.payment_method.name, "Tunai");
    assert_eq!(tx.items[0].name, "Bolu");
}

#[tokio::test]
async fn test_status_patch_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/transaksi/t1"))
        .and(body_json(json!({"status": "lunas"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_id": "t1"})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .update_transaction_status("t1", PaymentStatus::Paid)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_status_patch_unknown_id_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/transaksi/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Transaksi tidak ditemukan"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .update_transaction_status("missing", PaymentStatus::Pending)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::NotFound(ref body) if body == "Transaksi tidak ditemukan"));
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn test_gateway_timeout_is_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/produk"))
        .respond_with(ResponseTemplate::new(504))
        .mount(&server)
        .await;

    let err = client_for(&server).list_products().await.unwrap_err();

    assert!(matches!(err, ClientError::Server { status: 504, .. }));
    assert_eq!(err.code(), ErrorCode::TimeoutError);
    assert!(err.code().is_retryable());
}

#[tokio::test]
async fn test_unprocessable_payload_is_validation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/jenis-pembayaran"))
        .respond_with(ResponseTemplate::new(422).set_body_string("nama wajib diisi"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_payment_method(&PaymentMethodCreate { name: String::new() })
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(ref body) if body == "nama wajib diisi"));
}

#[tokio::test]
async fn test_deleted_payment_method_does_not_drop_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transaksi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "_id": "t1",
                "tanggal": "2026-10-19T02:00:00.000Z",
                "tipe": "langsung",
                "status": "lunas",
                "total": 10000,
                "jenis_pembayaran": {"_id": "pm1", "nama_pembayaran": "Tunai"},
                "produk": []
            },
            {
                "_id": "t2",
                "tanggal": "2026-10-19T03:00:00.000Z",
                "pembeli": "Rina",
                "tipe": "preorder",
                "status": "pending",
                "total": 12000,
                "jenis_pembayaran": null,
                "produk": []
            }
        ])))
        .mount(&server)
        .await;

    let transactions = client_for(&server).list_transactions().await.unwrap();

    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].payment_method.name, "Tunai");
    assert_eq!(transactions[1].payment_method.id, "");
    assert_eq!(
        transactions[1].payment_method.name,
        DELETED_PAYMENT_METHOD_NAME
    );
    assert_eq!(transactions[1].total, Decimal::from(12000));
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jenis-pembayaran"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_payment_methods().await.unwrap_err();

    match err {
        ClientError::Server { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "database down");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_product_ignores_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/produk/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("deleted"))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).delete_product("p1").await.unwrap();
}
