//! Client-side persistent storage port.
//!
//! Values are opaque strings under well-known keys, the same model as
//! browser local storage. Implementations persist every mutation before
//! returning.

use crate::error::Result;

/// Well-known storage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Token,
    UserId,
    UserRole,
    UserName,
    Cart,
}

impl StorageKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::UserId => "user_id",
            Self::UserRole => "user_role",
            Self::UserName => "user_name",
            Self::Cart => "cart",
        }
    }

    /// Keys holding the cached identity.
    pub const IDENTITY: [Self; 3] = [Self::UserId, Self::UserRole, Self::UserName];
}

/// String key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: StorageKey) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: StorageKey, value: &str) -> Result<()>;

    /// Delete a value. Deleting a missing key is not an error.
    fn remove(&self, key: StorageKey) -> Result<()>;
}
