//! Handlers for the `products` command group.

use serde_json::json;
use tabled::Tabled;

use super::command::{ProductFields, ProductFilterArgs, ProductsCommand};
use super::output;
use crate::domain::id::ProductId;
use crate::domain::product::{NewProduct, Product, ProductFilter, ProductUpdate};
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "Id")]
    id: ProductId,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Category")]
    category: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: output::money(product.price),
            category: product.category.clone().unwrap_or_default(),
        }
    }
}

pub async fn execute(services: &Services, command: ProductsCommand) -> Result<()> {
    match command {
        ProductsCommand::List(filter) => execute_list(services, filter).await,
        ProductsCommand::Create(fields) => execute_create(services, fields).await,
        ProductsCommand::Update { id, fields } => execute_update(services, id, fields).await,
        ProductsCommand::Delete { id } => execute_delete(services, id).await,
    }
}

fn details(fields: &ProductFields) -> Result<ProductUpdate> {
    Ok(ProductUpdate::try_new(
        &fields.name,
        fields.price,
        fields.category.as_deref(),
        fields.description.as_deref(),
    )?)
}

async fn execute_list(services: &Services, args: ProductFilterArgs) -> Result<()> {
    let filter = ProductFilter {
        category: args.category,
        price_min: args.min_price,
        price_max: args.max_price,
    };

    let pb = output::spinner("Fetching products...");
    let products = services.catalog.search_products(&filter).await;
    output::spinner_clear(&pb);
    let products = products?;

    if output::is_json() {
        output::json_output(json!({ "command": "products.list", "products": products }));
        return Ok(());
    }

    if products.is_empty() {
        output::note("No products found");
        return Ok(());
    }
    output::table(products.iter().map(ProductRow::from));
    Ok(())
}

async fn execute_create(services: &Services, fields: ProductFields) -> Result<()> {
    let identity = services.session.require_identity()?;
    let product = NewProduct {
        details: details(&fields)?,
        seller_id: identity.id,
    };

    services.catalog.create_product(&product).await?;

    if output::is_json() {
        output::json_output(json!({ "command": "products.create", "product": product }));
        return Ok(());
    }
    output::success(&format!("Created {}", output::highlight(&product.details.name)));
    Ok(())
}

async fn execute_update(services: &Services, id: ProductId, fields: ProductFields) -> Result<()> {
    let update = details(&fields)?;

    services.catalog.update_product(id, &update).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "products.update",
            "id": id,
            "product": update,
        }));
        return Ok(());
    }
    output::success(&format!("Updated product {}", output::highlight(id)));
    Ok(())
}

async fn execute_delete(services: &Services, id: ProductId) -> Result<()> {
    services.catalog.delete_product(id).await?;

    if output::is_json() {
        output::json_output(json!({ "command": "products.delete", "id": id }));
        return Ok(());
    }
    output::success(&format!("Deleted product {}", output::highlight(id)));
    Ok(())
}
