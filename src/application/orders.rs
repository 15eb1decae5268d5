//! Order endpoints.

use serde::de::IgnoredAny;
use serde::Serialize;
use tracing::info;

use crate::adapter::outbound::http::ApiClient;
use crate::domain::id::OrderId;
use crate::domain::order::{CreatedOrder, NewOrder, OrderDetail, OrderStatus, OrderSummary};
use crate::error::Result;

#[derive(Serialize)]
struct StatusUpdate {
    status: OrderStatus,
}

#[derive(Clone)]
pub struct Orders {
    api: ApiClient,
}

impl Orders {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Every order in the shop. Admin only on the backend.
    pub async fn list_all(&self) -> Result<Vec<OrderSummary>> {
        self.api.get("/order/orders").await
    }

    /// Orders placed by the logged-in user.
    pub async fn list_mine(&self) -> Result<Vec<OrderSummary>> {
        self.api.get("/order/orders/me").await
    }

    pub async fn get(&self, id: OrderId) -> Result<OrderDetail> {
        self.api.get(&format!("/order/orders/{id}")).await
    }

    pub async fn create(&self, order: &NewOrder) -> Result<CreatedOrder> {
        let created: CreatedOrder = self.api.post("/order/orders", order).await?;
        info!(
            order_id = %created.order_id,
            lines = order.items.len(),
            total = %order.total_price,
            "Placed order"
        );
        Ok(created)
    }

    pub async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<()> {
        let _: IgnoredAny = self
            .api
            .put(&format!("/order/orders/{id}/status"), &StatusUpdate { status })
            .await?;
        info!(order_id = %id, %status, "Updated order status");
        Ok(())
    }
}
