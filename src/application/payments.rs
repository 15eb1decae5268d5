//! Payment endpoints.

use tracing::info;

use crate::adapter::outbound::http::ApiClient;
use crate::domain::id::PaymentId;
use crate::domain::payment::{NewPayment, Payment, PaymentReceipt};
use crate::error::Result;

#[derive(Clone)]
pub struct Payments {
    api: ApiClient,
}

impl Payments {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create(&self, payment: &NewPayment) -> Result<PaymentReceipt> {
        let receipt: PaymentReceipt = self.api.post("/payments", payment).await?;
        info!(
            payment_id = %receipt.payment_id,
            order_id = %payment.order_id,
            status = %receipt.status,
            "Submitted payment"
        );
        Ok(receipt)
    }

    pub async fn get(&self, id: PaymentId) -> Result<Payment> {
        self.api.get(&format!("/payments/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal_macros::dec;
    use serde_json::{json, Value};

    use super::*;
    use crate::adapter::outbound::storage::MemoryStore;
    use crate::domain::id::OrderId;
    use crate::domain::payment::PaymentStatus;
    use crate::port::outbound::storage::KeyValueStore;
    use crate::port::outbound::transport::Transport;
    use crate::testkit::transport::ScriptedTransport;

    #[tokio::test]
    async fn create_posts_amount_as_number() {
        let transport = Arc::new(ScriptedTransport::new().with_json(
            200,
            json!({"payment_id": 4, "status": "pending", "message": "queued"}),
        ));
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let payments = Payments::new(ApiClient::new(
            "http://shop.test",
            transport.clone() as Arc<dyn Transport>,
            storage,
        ));
        let payment = NewPayment::try_new(OrderId::new(9), dec!(19.5), "card").unwrap();

        let receipt = payments.create(&payment).await.unwrap();

        assert_eq!(receipt.status, PaymentStatus::Pending);
        let sent = transport.requests();
        assert_eq!(sent[0].url, "http://shop.test/payments");
        let body: Value = serde_json::from_slice(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"order_id": 9, "amount": 19.5, "payment_method": "card"}));
    }
}
