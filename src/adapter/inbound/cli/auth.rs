//! Handlers for `register`, `login`, `logout` and `whoami`.

use dialoguer::theme::ColorfulTheme;
use dialoguer::Password;
use serde_json::json;

use super::command::{LoginArgs, RegisterArgs, WhoamiArgs};
use super::output;
use crate::domain::session::Identity;
use crate::error::{Result, SessionError};
use crate::infrastructure::bootstrap::Services;

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => Ok(Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?),
    }
}

fn print_identity(command: &str, identity: Option<&Identity>) {
    if output::is_json() {
        output::json_output(json!({
            "command": command,
            "identity": identity,
        }));
        return;
    }

    match identity {
        Some(identity) => {
            output::field("User", &identity.name);
            output::field("Id", identity.id);
            output::field("Role", identity.role);
        }
        None => output::warning("Logged in, but the backend did not return an identity"),
    }
}

/// Execute `register`.
pub async fn execute_register(services: &Services, args: RegisterArgs) -> Result<()> {
    let password = password_or_prompt(args.password)?;
    let pb = output::spinner("Creating account...");
    let identity = services
        .session
        .register(&args.name, &args.email, &password, args.role)
        .await;
    output::spinner_clear(&pb);
    let identity = identity?;

    output::success(&format!("Registered {}", output::highlight(&args.email)));
    print_identity("register", identity.as_ref());
    Ok(())
}

/// Execute `login`.
pub async fn execute_login(services: &Services, args: LoginArgs) -> Result<()> {
    let password = password_or_prompt(args.password)?;
    let pb = output::spinner("Logging in...");
    let identity = services.session.login(&args.email, &password).await;
    output::spinner_clear(&pb);
    let identity = identity?;

    output::success(&format!("Logged in as {}", output::highlight(&args.email)));
    print_identity("login", identity.as_ref());
    Ok(())
}

/// Execute `logout`.
pub fn execute_logout(services: &Services) -> Result<()> {
    services.session.logout()?;
    if output::is_json() {
        output::json_output(json!({ "command": "logout", "logged_out": true }));
        return Ok(());
    }
    output::success("Logged out");
    Ok(())
}

/// Execute `whoami`.
pub async fn execute_whoami(services: &Services, args: WhoamiArgs) -> Result<()> {
    let identity = if args.refresh {
        services.session.fetch_identity().await?
    } else {
        services.session.identity()?
    };

    let Some(identity) = identity else {
        return Err(SessionError::NotAuthenticated.into());
    };

    if output::is_json() {
        output::json_output(json!({ "command": "whoami", "identity": identity }));
        return Ok(());
    }
    output::field("User", &identity.name);
    output::field("Id", identity.id);
    output::field("Role", identity.role);
    Ok(())
}
