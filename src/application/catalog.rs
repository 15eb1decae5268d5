//! Catalog reader and product administration.

use serde::de::IgnoredAny;
use tracing::{debug, info};

use crate::adapter::outbound::http::ApiClient;
use crate::domain::id::ProductId;
use crate::domain::product::{NewProduct, Product, ProductFilter, ProductUpdate};
use crate::error::Result;

/// Reads the product list. No caching: every call goes to the backend so
/// prices are always current.
#[derive(Clone)]
pub struct Catalog {
    api: ApiClient,
}

impl Catalog {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch the full product list.
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        let products: Vec<Product> = self.api.get("/products/").await?;
        debug!(count = products.len(), "Fetched catalog");
        Ok(products)
    }

    /// Fetch products matching a server-side filter.
    pub async fn search_products(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        if filter.is_empty() {
            return self.list_products().await;
        }
        let products: Vec<Product> = self
            .api
            .get_query("/products/", &filter.query_pairs())
            .await?;
        debug!(count = products.len(), ?filter, "Fetched filtered catalog");
        Ok(products)
    }

    pub async fn create_product(&self, product: &NewProduct) -> Result<()> {
        let _: IgnoredAny = self.api.post("/products/", product).await?;
        info!(name = %product.details.name, seller_id = %product.seller_id, "Created product");
        Ok(())
    }

    pub async fn update_product(&self, id: ProductId, update: &ProductUpdate) -> Result<()> {
        let _: IgnoredAny = self.api.put(&format!("/products/{id}"), update).await?;
        info!(product_id = %id, "Updated product");
        Ok(())
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<()> {
        let _: IgnoredAny = self.api.delete(&format!("/products/{id}")).await?;
        info!(product_id = %id, "Deleted product");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;
    use crate::adapter::outbound::storage::MemoryStore;
    use crate::domain::id::UserId;
    use crate::error::Error;
    use crate::port::outbound::storage::KeyValueStore;
    use crate::port::outbound::transport::{Method, Transport};
    use crate::testkit::transport::ScriptedTransport;

    fn catalog(transport: ScriptedTransport) -> (Catalog, Arc<ScriptedTransport>) {
        let transport = Arc::new(transport);
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let api = ApiClient::new("http://shop.test", transport.clone() as Arc<dyn Transport>, storage);
        (Catalog::new(api), transport)
    }

    #[tokio::test]
    async fn every_listing_refetches() {
        let (catalog, transport) = catalog(
            ScriptedTransport::new()
                .with_json(200, json!([{"id": 1, "name": "Pen", "price": 2.0}]))
                .with_json(200, json!([{"id": 1, "name": "Pen", "price": 2.5}])),
        );

        let first = catalog.list_products().await.unwrap();
        let second = catalog.list_products().await.unwrap();

        assert_eq!(first[0].price, dec!(2.0));
        assert_eq!(second[0].price, dec!(2.5));
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn listing_failure_propagates() {
        let (catalog, _) = catalog(ScriptedTransport::new().with_status(503));

        let err = catalog.list_products().await.unwrap_err();

        assert!(matches!(err, Error::Request(ref r) if r.path == "/products/"));
    }

    #[tokio::test]
    async fn search_sends_filter_as_query() {
        let (catalog, transport) = catalog(ScriptedTransport::new().with_json(200, json!([])));
        let filter = ProductFilter {
            category: Some("tea".into()),
            price_min: Some(dec!(1)),
            price_max: None,
        };

        catalog.search_products(&filter).await.unwrap();

        assert_eq!(
            transport.requests()[0].url,
            "http://shop.test/products/?category=tea&price_min=1"
        );
    }

    #[tokio::test]
    async fn product_edits_hit_product_paths() {
        let (catalog, transport) = catalog(
            ScriptedTransport::new()
                .with_json(200, json!({"message": "created"}))
                .with_json(200, json!({"message": "updated"}))
                .with_json(200, json!({"message": "deleted"})),
        );
        let details = ProductUpdate::try_new("Pen", dec!(2), None, None).unwrap();

        catalog
            .create_product(&NewProduct {
                details: details.clone(),
                seller_id: UserId::new(3),
            })
            .await
            .unwrap();
        catalog.update_product(ProductId::new(9), &details).await.unwrap();
        catalog.delete_product(ProductId::new(9)).await.unwrap();

        let sent = transport.requests();
        assert_eq!((sent[0].method, sent[0].url.as_str()), (Method::Post, "http://shop.test/products/"));
        assert_eq!((sent[1].method, sent[1].url.as_str()), (Method::Put, "http://shop.test/products/9"));
        assert_eq!((sent[2].method, sent[2].url.as_str()), (Method::Delete, "http://shop.test/products/9"));
    }
}
