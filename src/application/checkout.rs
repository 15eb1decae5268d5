//! Checkout: the reconciled cart becomes an order, then optionally a payment.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::cart::CartStore;
use super::catalog::Catalog;
use super::orders::Orders;
use super::payments::Payments;
use super::session::SessionStore;
use crate::domain::cart::EntryId;
use crate::domain::error::DomainError;
use crate::domain::money::Price;
use crate::domain::order::{CreatedOrder, NewOrder};
use crate::domain::payment::{NewPayment, PaymentReceipt};
use crate::error::{CartError, Result};
use crate::port::outbound::storage::KeyValueStore;

/// What a completed checkout produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
    pub order: CreatedOrder,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Price,
    pub payment: Option<PaymentReceipt>,
}

#[derive(Clone)]
pub struct Checkout {
    session: SessionStore,
    catalog: Catalog,
    orders: Orders,
    payments: Payments,
    storage: Arc<dyn KeyValueStore>,
}

impl Checkout {
    pub fn new(
        session: SessionStore,
        catalog: Catalog,
        orders: Orders,
        payments: Payments,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            session,
            catalog,
            orders,
            payments,
            storage,
        }
    }

    /// Order every cart entry whose product is still in the catalog.
    ///
    /// Entries that no longer resolve stay in the cart. Nothing in the cart
    /// changes unless the order is accepted. A payment failure after the
    /// order exists is returned as an error; the order stands.
    pub async fn checkout(&self, payment_method: Option<&str>) -> Result<CheckoutReceipt> {
        let identity = self.session.require_identity()?;
        let payment_method = match payment_method.map(str::trim) {
            Some("") => return Err(DomainError::EmptyPaymentMethod.into()),
            other => other,
        };

        let mut cart = CartStore::load(self.storage.clone())?;
        if cart.is_empty() {
            return Err(CartError::Empty.into());
        }

        let products = self.catalog.list_products().await?;
        let view = cart.compute_view(&products)?;
        if view.is_empty() {
            return Err(CartError::Empty.into());
        }
        if view.unmatched > 0 {
            warn!(
                unmatched = view.unmatched,
                "Skipping cart entries whose products are no longer listed"
            );
        }

        let order = self
            .orders
            .create(&NewOrder::from_view(identity.id, &view))
            .await?;

        let ordered: Vec<EntryId> = view.lines.iter().map(|line| line.entry_id).collect();
        cart.remove_entries(&ordered)?;

        let payment = match payment_method {
            Some(method) => {
                let request = NewPayment::try_new(order.order_id, view.total, method)?;
                match self.payments.create(&request).await {
                    Ok(receipt) => Some(receipt),
                    Err(err) => {
                        warn!(order_id = %order.order_id, error = %err, "Order placed but payment failed");
                        return Err(err);
                    }
                }
            }
            None => None,
        };

        info!(
            order_id = %order.order_id,
            total = %view.total,
            paid = payment.is_some(),
            "Checkout complete"
        );
        Ok(CheckoutReceipt {
            order,
            total: view.total,
            payment,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};

    use super::*;
    use crate::adapter::outbound::http::ApiClient;
    use crate::adapter::outbound::storage::MemoryStore;
    use crate::domain::id::ProductId;
    use crate::error::{Error, SessionError};
    use crate::port::outbound::storage::StorageKey;
    use crate::port::outbound::transport::Transport;
    use crate::testkit::domain::logged_in;
    use crate::testkit::transport::ScriptedTransport;

    fn checkout(transport: &Arc<ScriptedTransport>, storage: &Arc<MemoryStore>) -> Checkout {
        let storage = storage.clone() as Arc<dyn KeyValueStore>;
        let api = ApiClient::new(
            "http://shop.test",
            transport.clone() as Arc<dyn Transport>,
            storage.clone(),
        );
        Checkout::new(
            SessionStore::new(api.clone(), storage.clone()),
            Catalog::new(api.clone()),
            Orders::new(api.clone()),
            Payments::new(api),
            storage,
        )
    }

    fn catalog_json() -> Value {
        json!([
            {"id": 1, "name": "Pen", "price": 10.0},
            {"id": 2, "name": "Ink", "price": 2.5}
        ])
    }

    fn fill_cart(storage: &Arc<MemoryStore>, products: &[i64]) {
        let mut cart = CartStore::load(storage.clone() as Arc<dyn KeyValueStore>).unwrap();
        for id in products {
            cart.add_to_cart(ProductId::new(*id)).unwrap();
        }
    }

    #[tokio::test]
    async fn orders_matched_lines_and_keeps_stale_entries() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .with_json(200, catalog_json())
                .with_json(200, json!({"order_id": 11, "message": "Order created"})),
        );
        let storage = Arc::new(logged_in(7));
        fill_cart(&storage, &[1, 1, 99, 2]);

        let receipt = checkout(&transport, &storage).checkout(None).await.unwrap();

        assert_eq!(receipt.order.order_id.get(), 11);
        assert_eq!(receipt.total, dec!(22.5));
        assert!(receipt.payment.is_none());

        let sent = transport.requests();
        let body: Value = serde_json::from_slice(sent[1].body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "user_id": 7,
                "items": [{"product_id": 1, "quantity": 2}, {"product_id": 2, "quantity": 1}],
                "total_price": 22.5
            })
        );

        let left = CartStore::load(storage as Arc<dyn KeyValueStore>).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left.entries()[0].product_id.get(), 99);
    }

    #[tokio::test]
    async fn pays_for_order_total_when_method_given() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .with_json(200, catalog_json())
                .with_json(200, json!({"order_id": 11}))
                .with_json(200, json!({"payment_id": 3, "status": "success"})),
        );
        let storage = Arc::new(logged_in(7));
        fill_cart(&storage, &[2, 2]);

        let receipt = checkout(&transport, &storage)
            .checkout(Some("card"))
            .await
            .unwrap();

        assert_eq!(receipt.payment.map(|p| p.payment_id.get()), Some(3));
        let sent = transport.requests();
        let body: Value = serde_json::from_slice(sent[2].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"order_id": 11, "amount": 5.0, "payment_method": "card"}));
    }

    #[tokio::test]
    async fn rejected_order_leaves_cart_untouched() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .with_json(200, catalog_json())
                .with_status(400),
        );
        let storage = Arc::new(logged_in(7));
        fill_cart(&storage, &[1]);
        let before = storage.get(StorageKey::Cart).unwrap();

        let err = checkout(&transport, &storage).checkout(None).await.unwrap_err();

        assert!(matches!(err, Error::Request(ref r) if r.status == 400));
        assert_eq!(storage.get(StorageKey::Cart).unwrap(), before);
    }

    #[tokio::test]
    async fn cart_of_only_stale_entries_is_empty() {
        let transport = Arc::new(ScriptedTransport::new().with_json(200, catalog_json()));
        let storage = Arc::new(logged_in(7));
        fill_cart(&storage, &[42]);

        let err = checkout(&transport, &storage).checkout(None).await.unwrap_err();

        assert!(matches!(err, Error::Cart(CartError::Empty)));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn unrepresentable_total_places_no_order() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .with_json(200, json!([{"id": 1, "name": "Vault", "price": 5e28}])),
        );
        let storage = Arc::new(logged_in(7));
        fill_cart(&storage, &[1, 1]);
        let before = storage.get(StorageKey::Cart).unwrap();

        let err = checkout(&transport, &storage).checkout(None).await.unwrap_err();

        assert!(matches!(err, Error::Cart(CartError::TotalOverflow)));
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(storage.get(StorageKey::Cart).unwrap(), before);
    }

    #[tokio::test]
    async fn requires_login_before_any_request() {
        let transport = Arc::new(ScriptedTransport::new());
        let storage = Arc::new(MemoryStore::new());
        fill_cart(&storage, &[1]);

        let err = checkout(&transport, &storage).checkout(None).await.unwrap_err();

        assert!(matches!(err, Error::Session(SessionError::NotAuthenticated)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn blank_payment_method_is_rejected_up_front() {
        let transport = Arc::new(ScriptedTransport::new());
        let storage = Arc::new(logged_in(7));
        fill_cart(&storage, &[1]);

        let err = checkout(&transport, &storage)
            .checkout(Some("  "))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Domain(DomainError::EmptyPaymentMethod)));
        assert!(transport.requests().is_empty());
    }
}
