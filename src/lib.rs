//! Storefront - client for a REST e-commerce backend.
//!
//! The crate talks to a storefront API (catalog, authentication, orders,
//! payments) and keeps the client-side state such a frontend needs: the
//! bearer token, the cached identity of the logged-in user and a shopping
//! cart, all persisted in a small key-value store.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Pure types and the cart state machine
//! - **`port`** - Traits at the edges: [`port::outbound::storage::KeyValueStore`]
//!   and [`port::outbound::transport::Transport`]
//! - **`adapter`** - reqwest transport, JSON file and in-memory storage, the CLI
//! - **`application`** - Use cases: session, catalog, cart, orders, checkout
//! - **`infrastructure`** - Configuration, logging and service wiring
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use storefront::adapter::outbound::http::{ApiClient, ApiConfig};
//! use storefront::adapter::outbound::storage::MemoryStore;
//! use storefront::application::{CartStore, Catalog};
//! use storefront::domain::ProductId;
//! use storefront::port::outbound::storage::KeyValueStore;
//!
//! # async fn demo() -> storefront::error::Result<()> {
//! let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
//! let api = ApiClient::from_config(&ApiConfig::default(), storage.clone())?;
//!
//! let mut cart = CartStore::load(storage)?;
//! cart.add_to_cart(ProductId::new(1))?;
//!
//! let products = Catalog::new(api).list_products().await?;
//! let view = cart.compute_view(&products)?;
//! println!("total: {}", view.total);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
