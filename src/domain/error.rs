//! Validation errors for values sent to the backend.
//!
//! These are raised before any request is issued, so a rejected value never
//! reaches the network.

use thiserror::Error;

use super::money::Price;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Product names must contain at least one non-whitespace character.
    #[error("product name must not be empty")]
    EmptyName,

    /// Prices must be strictly positive.
    #[error("price must be greater than 0, got {price}")]
    NonPositivePrice {
        /// The rejected price.
        price: Price,
    },

    #[error("unknown role '{0}' (expected user, admin or seller)")]
    UnknownRole(String),

    #[error("unknown order status '{0}' (expected created, in_progress, ready, delivered or cancelled)")]
    UnknownOrderStatus(String),

    #[error("payment method must not be empty")]
    EmptyPaymentMethod,
}
