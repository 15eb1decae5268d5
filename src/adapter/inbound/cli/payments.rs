//! Handlers for the `payments` command group.

use serde_json::json;

use super::command::PaymentsCommand;
use super::output;
use crate::domain::payment::NewPayment;
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;

pub async fn execute(services: &Services, command: PaymentsCommand) -> Result<()> {
    match command {
        PaymentsCommand::Create {
            order_id,
            amount,
            method,
        } => {
            let payment = NewPayment::try_new(order_id, amount, &method)?;
            let receipt = services.payments.create(&payment).await?;

            if output::is_json() {
                output::json_output(json!({ "command": "payments.create", "receipt": receipt }));
                return Ok(());
            }
            output::success(&format!(
                "Payment {} for order {}",
                output::highlight(receipt.payment_id),
                order_id
            ));
            output::field("Status", receipt.status);
            if !receipt.message.is_empty() {
                output::note(&receipt.message);
            }
            Ok(())
        }
        PaymentsCommand::Show { id } => {
            let payment = services.payments.get(id).await?;

            if output::is_json() {
                output::json_output(json!({ "command": "payments.show", "payment": payment }));
                return Ok(());
            }
            output::section(&format!("Payment {}", payment.payment_id));
            output::field("Status", payment.status);
            output::field("Amount", output::money(payment.amount));
            output::field("Created", payment.created_at.format("%Y-%m-%d %H:%M"));
            Ok(())
        }
    }
}
