//! Session store: bearer token plus cached identity.
//!
//! The token and identity live in client storage so they outlive the
//! process. Nothing expires on the client; a token is trusted until the
//! backend rejects it, at which point the identity fetch fails and the
//! cached identity is dropped.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::adapter::outbound::http::ApiClient;
use crate::domain::id::UserId;
use crate::domain::session::{Identity, Role};
use crate::error::{Error, Result, SessionError};
use crate::port::outbound::storage::{KeyValueStore, StorageKey};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    role: Role,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Clone)]
pub struct SessionStore {
    api: ApiClient,
    storage: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(api: ApiClient, storage: Arc<dyn KeyValueStore>) -> Self {
        Self { api, storage }
    }

    /// The cached bearer token, if any.
    pub fn token(&self) -> Result<Option<String>> {
        Ok(self
            .storage
            .get(StorageKey::Token)?
            .filter(|token| !token.is_empty()))
    }

    /// The cached identity.
    ///
    /// `None` when any identity field is missing or no longer parses.
    pub fn identity(&self) -> Result<Option<Identity>> {
        let id = self.storage.get(StorageKey::UserId)?;
        let role = self.storage.get(StorageKey::UserRole)?;
        let name = self.storage.get(StorageKey::UserName)?;

        let (Some(id), Some(role), Some(name)) = (id, role, name) else {
            return Ok(None);
        };
        let (Ok(id), Ok(role)) = (id.parse::<UserId>(), role.parse::<Role>()) else {
            return Ok(None);
        };

        Ok(Some(Identity { id, role, name }))
    }

    /// The cached identity, or [`SessionError::NotAuthenticated`].
    pub fn require_identity(&self) -> Result<Identity> {
        self.identity()?
            .ok_or_else(|| SessionError::NotAuthenticated.into())
    }

    /// Ask the backend who the token belongs to and cache the answer.
    ///
    /// Any request failure clears the cached identity and yields `None`:
    /// the caller is simply not logged in. Only local storage failures are
    /// returned as errors.
    pub async fn fetch_identity(&self) -> Result<Option<Identity>> {
        match self.api.get::<Identity>("/auth/me").await {
            Ok(identity) => {
                self.cache_identity(&identity)?;
                Ok(Some(identity))
            }
            Err(err @ Error::Storage(_)) => Err(err),
            Err(err) => {
                warn!(error = %err, "Identity fetch failed, clearing cached identity");
                self.clear_identity()?;
                Ok(None)
            }
        }
    }

    /// Log in, cache the token and refresh the identity.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<Identity>> {
        let response: TokenResponse = self
            .api
            .post("/auth/login", &LoginRequest { email, password })
            .await?;
        self.storage.set(StorageKey::Token, &response.token)?;
        info!(email, "Logged in");

        self.fetch_identity().await
    }

    /// Create an account, cache its token and refresh the identity.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Option<Identity>> {
        let request = RegisterRequest {
            name,
            email,
            password,
            role,
        };
        let response: TokenResponse = self.api.post("/auth/register", &request).await?;
        self.storage.set(StorageKey::Token, &response.token)?;
        info!(email, %role, "Registered");

        self.fetch_identity().await
    }

    /// Forget the token and identity. Never contacts the backend.
    pub fn logout(&self) -> Result<()> {
        self.storage.remove(StorageKey::Token)?;
        self.clear_identity()?;
        info!("Logged out");
        Ok(())
    }

    fn cache_identity(&self, identity: &Identity) -> Result<()> {
        self.storage
            .set(StorageKey::UserId, &identity.id.to_string())?;
        self.storage
            .set(StorageKey::UserRole, identity.role.as_str())?;
        self.storage.set(StorageKey::UserName, &identity.name)?;
        Ok(())
    }

    fn clear_identity(&self) -> Result<()> {
        for key in StorageKey::IDENTITY {
            self.storage.remove(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::adapter::outbound::storage::MemoryStore;
    use crate::port::outbound::transport::Transport;
    use crate::testkit::transport::ScriptedTransport;

    fn session(transport: ScriptedTransport) -> (SessionStore, Arc<ScriptedTransport>, Arc<MemoryStore>) {
        let transport = Arc::new(transport);
        let storage = Arc::new(MemoryStore::new());
        let api = ApiClient::new(
            "http://shop.test",
            transport.clone() as Arc<dyn Transport>,
            storage.clone() as Arc<dyn KeyValueStore>,
        );
        (
            SessionStore::new(api, storage.clone() as Arc<dyn KeyValueStore>),
            transport,
            storage,
        )
    }

    #[tokio::test]
    async fn login_caches_token_then_identity() {
        let (session, transport, _) = session(
            ScriptedTransport::new()
                .with_json(200, json!({"token": "jwt"}))
                .with_json(200, json!({"id": 7, "role": "seller", "name": "Sam", "email": "s@x"})),
        );

        let identity = session.login("s@x", "pw").await.unwrap().unwrap();

        assert_eq!(identity.role, Role::Seller);
        assert_eq!(session.token().unwrap().as_deref(), Some("jwt"));
        assert_eq!(session.identity().unwrap(), Some(identity));

        let sent = transport.requests();
        assert_eq!(sent[0].url, "http://shop.test/auth/login");
        assert_eq!(sent[1].url, "http://shop.test/auth/me");
        assert_eq!(sent[1].header("authorization"), Some("Bearer jwt"));
    }

    #[tokio::test]
    async fn failed_login_stores_nothing() {
        let (session, _, storage) = session(ScriptedTransport::new().with_status(401));

        let err = session.login("s@x", "bad").await.unwrap_err();

        assert!(matches!(err, Error::Request(ref r) if r.status == 401));
        assert!(!storage.contains(StorageKey::Token));
    }

    #[tokio::test]
    async fn identity_fetch_failure_clears_cached_identity() {
        let (session, _, storage) = session(ScriptedTransport::new().with_status(500));
        storage.set(StorageKey::UserId, "1").unwrap();
        storage.set(StorageKey::UserRole, "admin").unwrap();
        storage.set(StorageKey::UserName, "Root").unwrap();
        storage.set(StorageKey::Token, "stale").unwrap();

        let identity = session.fetch_identity().await.unwrap();

        assert_eq!(identity, None);
        assert_eq!(session.identity().unwrap(), None);
        for key in StorageKey::IDENTITY {
            assert!(!storage.contains(key));
        }
        assert!(storage.contains(StorageKey::Token));
    }

    #[tokio::test]
    async fn register_sends_role_and_caches_identity() {
        let (session, transport, _) = session(
            ScriptedTransport::new()
                .with_json(200, json!({"message": "ok", "token": "new"}))
                .with_json(200, json!({"id": 2, "role": "user", "name": "Ivy"})),
        );

        let identity = session
            .register("Ivy", "ivy@x", "secret1", Role::User)
            .await
            .unwrap();

        assert_eq!(identity.map(|i| i.name), Some("Ivy".to_string()));
        let sent = transport.requests();
        let body: serde_json::Value = serde_json::from_slice(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["role"], "user");
        assert_eq!(body["name"], "Ivy");
    }

    #[tokio::test]
    async fn logout_clears_everything_without_network() {
        let (session, transport, storage) = session(ScriptedTransport::new());
        storage.set(StorageKey::Token, "jwt").unwrap();
        storage.set(StorageKey::UserId, "1").unwrap();
        storage.set(StorageKey::UserRole, "user").unwrap();
        storage.set(StorageKey::UserName, "Ann").unwrap();
        storage.set(StorageKey::Cart, "[]").unwrap();

        session.logout().unwrap();

        assert_eq!(session.token().unwrap(), None);
        assert_eq!(session.identity().unwrap(), None);
        assert!(storage.contains(StorageKey::Cart));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn malformed_cached_identity_reads_as_logged_out() {
        let (session, _, storage) = session(ScriptedTransport::new());
        storage.set(StorageKey::UserId, "not-a-number").unwrap();
        storage.set(StorageKey::UserRole, "user").unwrap();
        storage.set(StorageKey::UserName, "Ann").unwrap();

        assert_eq!(session.identity().unwrap(), None);
        assert!(matches!(
            session.require_identity(),
            Err(Error::Session(SessionError::NotAuthenticated))
        ));
    }
}
