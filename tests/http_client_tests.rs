//! Request failures surface as typed errors and leave client state alone.

mod support;

use std::sync::Arc;

use serde_json::json;
use storefront::adapter::outbound::storage::MemoryStore;
use storefront::domain::ProductId;
use storefront::error::Error;
use storefront::port::outbound::storage::{KeyValueStore, StorageKey};
use storefront::testkit::domain::logged_in;
use storefront::testkit::transport::ScriptedTransport;

#[tokio::test]
async fn not_found_listing_reports_path_and_status() {
    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let (services, _) = support::services(ScriptedTransport::new().with_status(404), storage);

    let err = services.catalog.list_products().await.unwrap_err();

    match err {
        Error::Request(request) => {
            assert_eq!(request.path, "/products/");
            assert_eq!(request.status, 404);
            assert_eq!(request.to_string(), "GET /products/ failed: Not Found");
        }
        other => panic!("expected request error, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_request_changes_no_local_state() {
    let storage = Arc::new(logged_in(3));
    let (services, _) = support::services(
        ScriptedTransport::new().with_status(404),
        storage.clone() as Arc<dyn KeyValueStore>,
    );
    let mut cart = services.cart().unwrap();
    cart.add_to_cart(ProductId::new(1)).unwrap();
    let cart_before = storage.get(StorageKey::Cart).unwrap();

    let result = services.orders.list_mine().await;

    assert!(matches!(result, Err(Error::Request(ref r)) if r.status == 404));
    assert_eq!(storage.get(StorageKey::Cart).unwrap(), cart_before);
    assert_eq!(storage.get(StorageKey::Token).unwrap().as_deref(), Some("test-token"));
    assert_eq!(services.session.identity().unwrap().map(|i| i.id.get()), Some(3));
}

#[tokio::test]
async fn unauthorized_and_server_errors_are_alike() {
    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let (services, _) = support::services(
        ScriptedTransport::new().with_status(401).with_status(500),
        storage,
    );

    let unauthorized = services.users.list_users().await.unwrap_err();
    let server = services.users.list_users().await.unwrap_err();

    assert!(matches!(unauthorized, Error::Request(ref r) if r.status_text == "Unauthorized"));
    assert!(matches!(server, Error::Request(ref r) if r.status_text == "Internal Server Error"));
}

#[tokio::test]
async fn transport_failure_is_not_a_request_error() {
    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let (services, transport) = support::services(
        ScriptedTransport::new().with_error("connection refused"),
        storage,
    );

    let err = services.catalog.list_products().await.unwrap_err();

    assert!(matches!(err, Error::Connection(_)));
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn bearer_token_follows_storage_between_calls() {
    let storage = Arc::new(MemoryStore::new());
    let (services, transport) = support::services(
        ScriptedTransport::new()
            .with_json(200, support::catalog())
            .with_json(200, support::catalog())
            .with_json(200, json!([])),
        storage.clone() as Arc<dyn KeyValueStore>,
    );

    services.catalog.list_products().await.unwrap();
    storage.set(StorageKey::Token, "abc").unwrap();
    services.catalog.list_products().await.unwrap();
    services.session.logout().unwrap();
    services.orders.list_mine().await.unwrap();

    let sent = transport.requests();
    assert_eq!(sent[0].header("authorization"), None);
    assert_eq!(sent[1].header("authorization"), Some("Bearer abc"));
    assert_eq!(sent[2].header("authorization"), None);
}
