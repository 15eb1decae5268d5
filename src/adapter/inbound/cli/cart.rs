//! Handlers for the `cart` command group.

use serde_json::json;
use tabled::Tabled;

use super::command::CartCommand;
use super::output;
use crate::application::CartStore;
use crate::domain::cart::{CartLine, EntryId, QuantityChange};
use crate::domain::id::ProductId;
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "Entry")]
    entry: EntryId,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Total")]
    total: String,
}

impl From<&CartLine> for LineRow {
    fn from(line: &CartLine) -> Self {
        Self {
            entry: line.entry_id,
            product: line.product.name.clone(),
            quantity: line.quantity,
            unit: output::money(line.product.price),
            total: output::money(line.line_total),
        }
    }
}

pub async fn execute(services: &Services, command: CartCommand) -> Result<()> {
    match command {
        CartCommand::Add { product_id } => execute_add(services, product_id),
        CartCommand::Set { entry_id, quantity } => execute_set(services, entry_id, quantity),
        CartCommand::Remove { entry_id } => execute_remove(services, entry_id),
        CartCommand::Show => execute_show(services).await,
        CartCommand::Clear => execute_clear(services),
    }
}

fn execute_add(services: &Services, product_id: ProductId) -> Result<()> {
    let mut cart = services.cart()?;
    let entry_id = cart.add_to_cart(product_id)?;
    let quantity = cart.cart().get(entry_id).map_or(1, |entry| entry.quantity.get());

    if output::is_json() {
        output::json_output(json!({
            "command": "cart.add",
            "entry_id": entry_id,
            "product_id": product_id,
            "quantity": quantity,
        }));
        return Ok(());
    }
    output::success(&format!(
        "Product {} in cart (entry {}, quantity {})",
        output::highlight(product_id),
        entry_id,
        quantity
    ));
    Ok(())
}

fn execute_set(services: &Services, entry_id: EntryId, quantity: i64) -> Result<()> {
    let mut cart = services.cart()?;
    let change = cart.set_quantity(entry_id, quantity)?;

    if output::is_json() {
        let quantity = match change {
            QuantityChange::Updated(quantity) => Some(quantity.get()),
            QuantityChange::Removed => None,
        };
        output::json_output(json!({
            "command": "cart.set",
            "entry_id": entry_id,
            "quantity": quantity,
            "removed": quantity.is_none(),
        }));
        return Ok(());
    }
    match change {
        QuantityChange::Updated(quantity) => {
            output::success(&format!("Entry {entry_id} quantity set to {quantity}"));
        }
        QuantityChange::Removed => output::success(&format!("Entry {entry_id} removed")),
    }
    Ok(())
}

fn execute_remove(services: &Services, entry_id: EntryId) -> Result<()> {
    let mut cart = services.cart()?;
    let entry = cart.remove(entry_id)?;

    if output::is_json() {
        output::json_output(json!({ "command": "cart.remove", "removed": entry }));
        return Ok(());
    }
    output::success(&format!(
        "Removed entry {} (product {})",
        entry_id, entry.product_id
    ));
    Ok(())
}

async fn execute_show(services: &Services) -> Result<()> {
    let cart = services.cart()?;
    if cart.is_empty() {
        if output::is_json() {
            output::json_output(json!({
                "command": "cart.show",
                "lines": [],
                "total": 0.0,
                "unmatched": 0,
            }));
            return Ok(());
        }
        output::note("Cart is empty");
        return Ok(());
    }

    let pb = output::spinner("Pricing cart...");
    let products = services.catalog.list_products().await;
    output::spinner_clear(&pb);
    let view = cart.compute_view(&products?)?;

    if output::is_json() {
        let mut value = serde_json::to_value(&view)?;
        value["command"] = json!("cart.show");
        output::json_output(value);
        return Ok(());
    }

    if view.is_empty() {
        output::note("None of the products in your cart are listed any more");
    } else {
        output::table(view.lines.iter().map(LineRow::from));
        output::field("Total", output::money(view.total));
    }
    if view.unmatched > 0 {
        output::warning(&format!(
            "{} cart entr{} not priced: product no longer listed",
            view.unmatched,
            if view.unmatched == 1 { "y" } else { "ies" }
        ));
    }
    Ok(())
}

fn execute_clear(services: &Services) -> Result<()> {
    CartStore::reset(services.storage.as_ref())?;

    if output::is_json() {
        output::json_output(json!({ "command": "cart.clear", "cleared": true }));
        return Ok(());
    }
    output::success("Cart cleared");
    Ok(())
}
