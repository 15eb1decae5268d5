//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use super::{output, paths};
use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap::expand_home;
use crate::infrastructure::config::settings::{Config, API_URL_ENV};

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, CONFIG_TEMPLATE)?;

    if output::is_json() {
        output::json_output(json!({ "command": "config.init", "path": path }));
        return Ok(());
    }
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::hint(&format!("edit {} to point at your backend", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path, config: &Config) -> Result<()> {
    let storage_path = config
        .storage
        .path
        .as_deref()
        .map_or_else(paths::default_storage, expand_home);

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path,
            "loaded": path.exists(),
            "config": config,
            "storage_path": storage_path,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field(
        "File",
        if path.exists() {
            path.display().to_string()
        } else {
            format!("{} {}", path.display(), output::muted("(not found, using defaults)"))
        },
    );

    output::section("API");
    output::field("Base URL", &config.api.base_url);
    if std::env::var(API_URL_ENV).is_ok() {
        output::note(&format!("overridden by {API_URL_ENV}"));
    }
    output::field(
        "Timeout",
        config
            .api
            .timeout_ms
            .map_or_else(|| "none".to_string(), |ms| format!("{ms}ms")),
    );

    output::section("Storage");
    output::field("Backend", config.storage.backend);
    output::field("Path", storage_path.display());

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);
    Ok(())
}
