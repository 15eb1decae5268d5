//! CLI module graph.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod orders;
pub mod output;
pub mod paths;
pub mod payments;
pub mod users;

pub use command::Cli;
pub use dispatch::run;
