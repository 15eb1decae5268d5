//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`transport`]: `ScriptedTransport`, a [`Transport`](crate::port::outbound::transport::Transport)
//!   that replays queued responses and records every request.
//! - [`domain`]: builders for products, identities and logged-in storage.

pub mod domain;
pub mod transport;
