//! Handlers for the `orders` command group.

use serde_json::json;
use tabled::Tabled;

use super::command::OrdersCommand;
use super::output;
use crate::domain::id::{OrderId, ProductId};
use crate::domain::order::{OrderItem, OrderStatus, OrderSummary};
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "Order")]
    id: OrderId,
    #[tabled(rename = "Status")]
    status: OrderStatus,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Placed")]
    created_at: String,
}

impl From<&OrderSummary> for OrderRow {
    fn from(order: &OrderSummary) -> Self {
        Self {
            id: order.order_id,
            status: order.status,
            total: output::money(order.total_price),
            created_at: order.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "Product")]
    product_id: ProductId,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Price")]
    price: String,
}

impl From<&OrderItem> for ItemRow {
    fn from(item: &OrderItem) -> Self {
        Self {
            product_id: item.product_id,
            name: item.name.clone(),
            quantity: item.quantity,
            price: output::money(item.price),
        }
    }
}

pub async fn execute(services: &Services, command: OrdersCommand) -> Result<()> {
    match command {
        OrdersCommand::Mine => {
            let orders = services.orders.list_mine().await?;
            print_orders("orders.mine", &orders);
            Ok(())
        }
        OrdersCommand::All => {
            let orders = services.orders.list_all().await?;
            print_orders("orders.all", &orders);
            Ok(())
        }
        OrdersCommand::Show { id } => execute_show(services, id).await,
        OrdersCommand::Status { id, status } => {
            services.orders.update_status(id, status).await?;
            if output::is_json() {
                output::json_output(json!({
                    "command": "orders.status",
                    "order_id": id,
                    "status": status,
                }));
                return Ok(());
            }
            output::success(&format!("Order {} is now {}", output::highlight(id), status));
            Ok(())
        }
    }
}

fn print_orders(command: &str, orders: &[OrderSummary]) {
    if output::is_json() {
        output::json_output(json!({ "command": command, "orders": orders }));
        return;
    }
    if orders.is_empty() {
        output::note("No orders yet");
        return;
    }
    output::table(orders.iter().map(OrderRow::from));
}

async fn execute_show(services: &Services, id: OrderId) -> Result<()> {
    let order = services.orders.get(id).await?;

    if output::is_json() {
        output::json_output(json!({ "command": "orders.show", "order": order }));
        return Ok(());
    }

    output::section(&format!("Order {}", order.order_id));
    output::field("Customer", order.user_id);
    output::field("Status", order.status);
    output::field("Placed", order.created_at.format("%Y-%m-%d %H:%M"));
    output::table(order.items.iter().map(ItemRow::from));
    output::field("Total", output::money(order.total_price));
    Ok(())
}
