//! Client-side storage adapters.

pub mod file;
pub mod memory;
pub mod settings;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use settings::{StorageBackend, StorageConfig};
