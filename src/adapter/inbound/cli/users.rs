//! Handlers for the `users` command group.

use serde_json::json;
use tabled::Tabled;

use super::command::UsersCommand;
use super::output;
use crate::domain::id::UserId;
use crate::domain::session::Role;
use crate::domain::user::UserAccount;
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "Id")]
    id: UserId,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: Role,
}

impl From<&UserAccount> for UserRow {
    fn from(user: &UserAccount) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

pub async fn execute(services: &Services, command: UsersCommand) -> Result<()> {
    match command {
        UsersCommand::List => {
            let users = services.users.list_users().await?;
            if output::is_json() {
                output::json_output(json!({ "command": "users.list", "users": users }));
                return Ok(());
            }
            output::table(users.iter().map(UserRow::from));
            Ok(())
        }
        UsersCommand::Role { id, role } => {
            services.users.update_role(id, role).await?;
            if output::is_json() {
                output::json_output(json!({
                    "command": "users.role",
                    "user_id": id,
                    "role": role,
                }));
                return Ok(());
            }
            output::success(&format!("User {} is now {}", output::highlight(id), role));
            Ok(())
        }
    }
}
