//! User accounts as listed by the admin endpoints.

use serde::{Deserialize, Serialize};

use super::id::UserId;
use super::session::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}
