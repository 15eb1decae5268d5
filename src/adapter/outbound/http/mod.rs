//! Backend REST access: the typed [`ApiClient`] and its reqwest transport.

pub mod client;
pub mod settings;
pub mod transport;

pub use client::ApiClient;
pub use settings::ApiConfig;
pub use transport::ReqwestTransport;
