//! Handler for `checkout`.

use serde_json::json;

use super::command::CheckoutArgs;
use super::output;
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;

pub async fn execute(services: &Services, args: CheckoutArgs) -> Result<()> {
    let pb = output::spinner("Placing order...");
    let receipt = services
        .checkout
        .checkout(args.payment_method.as_deref())
        .await;
    output::spinner_clear(&pb);
    let receipt = receipt?;

    if output::is_json() {
        output::json_output(json!({ "command": "checkout", "receipt": receipt }));
        return Ok(());
    }

    output::success(&format!(
        "Order {} placed",
        output::highlight(receipt.order.order_id)
    ));
    output::field("Total", output::money(receipt.total));
    if !receipt.order.message.is_empty() {
        output::note(&receipt.order.message);
    }
    match &receipt.payment {
        Some(payment) => {
            output::field("Payment", payment.payment_id);
            output::field("Status", payment.status);
        }
        None => output::hint(&format!(
            "pay later with {}",
            output::highlight(format!(
                "storefront payments create --order {} --amount {} --method <METHOD>",
                receipt.order.order_id, receipt.total
            ))
        )),
    }
    Ok(())
}
