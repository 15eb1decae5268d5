//! Application services (use cases).
//!
//! Each service wraps an [`ApiClient`](crate::adapter::outbound::http::ApiClient)
//! and, where it owns client state, a
//! [`KeyValueStore`](crate::port::outbound::storage::KeyValueStore).

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod payments;
pub mod session;
pub mod users;

pub use cart::CartStore;
pub use catalog::Catalog;
pub use checkout::{Checkout, CheckoutReceipt};
pub use orders::Orders;
pub use payments::Payments;
pub use session::SessionStore;
pub use users::Users;
