//! Storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which storage adapter backs the session and cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON document on disk; survives between runs.
    #[default]
    File,
    /// Process memory only; everything is lost on exit.
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Storage file for the `file` backend. Defaults to
    /// `~/.storefront/storage.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}
