//! Payment shapes.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{OrderId, PaymentId};
use super::money::Price;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Success => write!(f, "success"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Payload for paying an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPayment {
    pub order_id: OrderId,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Price,
    pub payment_method: String,
}

impl NewPayment {
    pub fn try_new(order_id: OrderId, amount: Price, method: &str) -> Result<Self, DomainError> {
        if amount <= Price::ZERO {
            return Err(DomainError::NonPositivePrice { price: amount });
        }
        let method = method.trim();
        if method.is_empty() {
            return Err(DomainError::EmptyPaymentMethod);
        }
        Ok(Self {
            order_id,
            amount,
            payment_method: method.to_string(),
        })
    }
}

/// Response to a payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub payment_id: PaymentId,
    pub status: PaymentStatus,
    #[serde(default)]
    pub message: String,
}

/// Stored payment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: PaymentId,
    pub status: PaymentStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Price,
    #[serde(with = "crate::domain::time")]
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn new_payment_validates_amount_and_method() {
        let payment = NewPayment::try_new(OrderId::new(1), dec!(10), " card ").unwrap();
        assert_eq!(payment.payment_method, "card");

        assert_eq!(
            NewPayment::try_new(OrderId::new(1), dec!(-1), "card"),
            Err(DomainError::NonPositivePrice { price: dec!(-1) })
        );
        assert_eq!(
            NewPayment::try_new(OrderId::new(1), dec!(1), "  "),
            Err(DomainError::EmptyPaymentMethod)
        );
    }

    #[test]
    fn payment_record_parses() {
        let json = r#"{"payment_id": 5, "status": "success", "amount": 20.0, "created_at": "2024-01-02T03:04:05"}"#;
        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.status, PaymentStatus::Success);
        assert_eq!(payment.amount, dec!(20));
    }
}
