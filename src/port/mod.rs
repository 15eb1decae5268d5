//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the seams between the storefront services and the outside
//! world. Adapters in [`crate::adapter`] implement them.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │       Application        │
//!                 │ session · cart · catalog │
//!                 └─────┬──────────────┬─────┘
//!                       │              │
//!                       ▼              ▼
//!               ┌──────────────┐ ┌──────────────┐
//!               │ KeyValueStore│ │  Transport   │
//!               └──────┬───────┘ └──────┬───────┘
//!                      ▼                ▼
//!              file / memory       reqwest / scripted
//! ```

pub mod outbound;

pub use outbound::storage::{KeyValueStore, StorageKey};
pub use outbound::transport::{HttpRequest, HttpResponse, Method, Transport};
