//! Builders for domain values used across tests.

use rust_decimal::Decimal;

use crate::adapter::outbound::storage::MemoryStore;
use crate::domain::id::{ProductId, UserId};
use crate::domain::product::Product;
use crate::domain::session::{Identity, Role};
use crate::port::outbound::storage::StorageKey;

/// A catalog product named `p{id}` with the given price.
pub fn product(id: i64, price: Decimal) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("p{id}"),
        price,
        category: None,
        description: None,
        seller_id: None,
    }
}

/// An identity with the given id and role.
pub fn identity(id: i64, role: Role) -> Identity {
    Identity {
        id: UserId::new(id),
        role,
        name: format!("user{id}"),
    }
}

/// Storage holding a token and the cached identity of a regular user.
pub fn logged_in(user_id: i64) -> MemoryStore {
    logged_in_as(&identity(user_id, Role::User))
}

/// Storage holding a token and the given cached identity.
pub fn logged_in_as(identity: &Identity) -> MemoryStore {
    MemoryStore::new()
        .with_value(StorageKey::Token, "test-token")
        .with_value(StorageKey::UserId, &identity.id.to_string())
        .with_value(StorageKey::UserRole, identity.role.as_str())
        .with_value(StorageKey::UserName, &identity.name)
}
