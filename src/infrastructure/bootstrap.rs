//! Composition root: turns a [`Config`] into wired services.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::adapter::outbound::http::ApiClient;
use crate::adapter::outbound::storage::{FileStore, MemoryStore, StorageBackend, StorageConfig};
use crate::application::{
    CartStore, Catalog, Checkout, Orders, Payments, SessionStore, Users,
};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::storage::KeyValueStore;

/// Expand a leading `~/` to the home directory.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// Open the configured storage backend.
///
/// `default_path` is used by the file backend when the config names no path.
pub fn build_storage(
    config: &StorageConfig,
    default_path: &Path,
) -> Result<Arc<dyn KeyValueStore>> {
    match config.backend {
        StorageBackend::File => {
            let path = config
                .path
                .as_deref()
                .map_or_else(|| default_path.to_path_buf(), expand_home);
            debug!(path = %path.display(), "Opening file storage");
            Ok(Arc::new(FileStore::open(path)?))
        }
        StorageBackend::Memory => {
            debug!("Using in-memory storage");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Every service the CLI needs, sharing one client and one store.
#[derive(Clone)]
pub struct Services {
    pub storage: Arc<dyn KeyValueStore>,
    pub api: ApiClient,
    pub session: SessionStore,
    pub catalog: Catalog,
    pub orders: Orders,
    pub users: Users,
    pub payments: Payments,
    pub checkout: Checkout,
}

impl Services {
    /// Wire services over a reqwest transport.
    pub fn from_config(config: &Config, default_storage: &Path) -> Result<Self> {
        let storage = build_storage(&config.storage, default_storage)?;
        let api = ApiClient::from_config(&config.api, storage.clone())?;
        Ok(Self::with_client(api, storage))
    }

    /// Wire services around an existing client.
    #[must_use]
    pub fn with_client(api: ApiClient, storage: Arc<dyn KeyValueStore>) -> Self {
        let session = SessionStore::new(api.clone(), storage.clone());
        let catalog = Catalog::new(api.clone());
        let orders = Orders::new(api.clone());
        let payments = Payments::new(api.clone());
        let checkout = Checkout::new(
            session.clone(),
            catalog.clone(),
            orders.clone(),
            payments.clone(),
            storage.clone(),
        );
        Self {
            users: Users::new(api.clone()),
            storage,
            api,
            session,
            catalog,
            orders,
            payments,
            checkout,
        }
    }

    /// Load the persisted cart.
    pub fn cart(&self) -> Result<CartStore> {
        CartStore::load(self.storage.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::ProductId;
    use crate::port::outbound::storage::StorageKey;

    #[test]
    fn file_backend_uses_default_path_when_unset() {
        let dir = tempfile::tempdir().unwrap();
        let default = dir.path().join("storage.json");

        let storage = build_storage(&StorageConfig::default(), &default).unwrap();
        storage.set(StorageKey::Token, "t").unwrap();

        assert!(default.exists());
    }

    #[test]
    fn tilde_paths_expand_to_home() {
        let expanded = expand_home(Path::new("~/.storefront/storage.json"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join(".storefront/storage.json"));
        }
        assert_eq!(expand_home(Path::new("/tmp/s.json")), Path::new("/tmp/s.json"));
    }

    #[test]
    fn memory_backend_touches_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let default = dir.path().join("storage.json");
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            path: None,
        };

        let storage = build_storage(&config, &default).unwrap();
        storage.set(StorageKey::Token, "t").unwrap();

        assert!(!default.exists());
    }

    #[test]
    fn services_share_storage() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();

        let services = Services::from_config(&config, &dir.path().join("s.json")).unwrap();
        services.cart().unwrap().add_to_cart(ProductId::new(1)).unwrap();

        assert_eq!(services.cart().unwrap().len(), 1);
        assert_eq!(services.api.base_url(), "http://localhost:8000");
    }

    #[test]
    fn services_build_with_configured_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.api.timeout_ms = Some(2500);

        let services = Services::from_config(&config, &dir.path().join("s.json"));

        assert!(services.is_ok());
    }
}
