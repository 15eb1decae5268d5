//! Monetary types.

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
///
/// The backend exchanges prices as JSON numbers; fields of this type are
/// (de)serialized through `rust_decimal::serde::float`.
pub type Price = Decimal;

/// `price * quantity`, or `None` when the product does not fit a `Decimal`.
#[must_use]
pub fn line_total(price: Price, quantity: u32) -> Option<Price> {
    price.checked_mul(Decimal::from(quantity))
}

/// Sum of `amounts`, or `None` on overflow.
#[must_use]
pub fn checked_sum(amounts: impl IntoIterator<Item = Price>) -> Option<Price> {
    amounts
        .into_iter()
        .try_fold(Price::ZERO, |acc, amount| acc.checked_add(amount))
}
