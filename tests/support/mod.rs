#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use storefront::adapter::outbound::http::ApiClient;
use storefront::infrastructure::bootstrap::Services;
use storefront::port::outbound::storage::KeyValueStore;
use storefront::port::outbound::transport::Transport;
use storefront::testkit::transport::ScriptedTransport;

pub const BASE_URL: &str = "http://shop.test";

/// Services over a scripted backend and the given storage.
pub fn services(
    transport: ScriptedTransport,
    storage: Arc<dyn KeyValueStore>,
) -> (Services, Arc<ScriptedTransport>) {
    let transport = Arc::new(transport);
    let api = ApiClient::new(
        BASE_URL,
        transport.clone() as Arc<dyn Transport>,
        storage.clone(),
    );
    (Services::with_client(api, storage), transport)
}

/// Catalog with a 100.00 chair and a 5.00 mug.
pub fn catalog() -> Value {
    json!([
        {"id": 1, "name": "Chair", "price": 100.0, "category": "home"},
        {"id": 2, "name": "Mug", "price": 5.0, "category": "kitchen"}
    ])
}

pub fn body_json(body: Option<&[u8]>) -> Value {
    serde_json::from_slice(body.expect("request has a body")).expect("body is JSON")
}
