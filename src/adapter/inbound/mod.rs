//! Inbound adapters: ways into the application.

pub mod cli;
