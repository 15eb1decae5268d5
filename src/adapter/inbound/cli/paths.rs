//! Path utilities for storefront.
//!
//! All client data lives under `~/.storefront/`:
//! - `~/.storefront/config.toml` - configuration
//! - `~/.storefront/storage.json` - session token, identity and cart

use std::path::PathBuf;

/// Returns the storefront home directory (`~/.storefront/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".storefront")
}

/// Returns the default config file path (`~/.storefront/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default storage file path (`~/.storefront/storage.json`).
pub fn default_storage() -> PathBuf {
    home_dir().join("storage.json")
}
