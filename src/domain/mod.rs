//! Backend-agnostic storefront types: products, the cart state machine,
//! session identity, orders and payments.
//!
//! Everything here is plain data plus the rules that govern it. Nothing in
//! this module performs I/O; persistence and HTTP live behind the ports in
//! [`crate::port`].

pub mod cart;
pub mod error;
pub mod id;
pub mod money;
pub mod order;
pub mod payment;
pub mod product;
pub mod session;
mod time;
pub mod user;

pub use cart::{Cart, CartEntry, CartLine, CartView, EntryId};
pub use error::DomainError;
pub use id::{OrderId, PaymentId, ProductId, UserId};
pub use money::Price;
pub use order::{CreatedOrder, NewOrder, OrderDetail, OrderItem, OrderLine, OrderStatus, OrderSummary};
pub use payment::{NewPayment, Payment, PaymentReceipt, PaymentStatus};
pub use product::{NewProduct, Product, ProductFilter, ProductUpdate};
pub use session::{Identity, Role};
pub use user::UserAccount;
