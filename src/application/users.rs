//! Admin user management.

use serde::de::IgnoredAny;
use serde::Serialize;
use tracing::info;

use crate::adapter::outbound::http::ApiClient;
use crate::domain::id::UserId;
use crate::domain::session::Role;
use crate::domain::user::UserAccount;
use crate::error::Result;

#[derive(Serialize)]
struct RoleUpdate {
    role: Role,
}

#[derive(Clone)]
pub struct Users {
    api: ApiClient,
}

impl Users {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list_users(&self) -> Result<Vec<UserAccount>> {
        self.api.get("/auth/users").await
    }

    pub async fn update_role(&self, id: UserId, role: Role) -> Result<()> {
        let _: IgnoredAny = self
            .api
            .put(&format!("/auth/users/{id}/role"), &RoleUpdate { role })
            .await?;
        info!(user_id = %id, %role, "Updated user role");
        Ok(())
    }
}
