//! Entry point for a parsed command line.

use tracing::debug;

use super::command::{Cli, ColorChoice, Commands, ConfigCommand};
use super::output::{self, OutputConfig};
use super::{auth, cart, catalog, checkout, config, orders, paths, payments, users};
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;
use crate::infrastructure::config::settings::Config;

/// Apply global flags, load configuration, wire services and run the command.
pub async fn run(cli: Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet));
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }

    // `config init` must work even when the existing file is broken.
    if let Commands::Config(ConfigCommand::Init { force }) = cli.command {
        return config::execute_init(&cli.config, force);
    }

    let config = Config::load_or_default(&cli.config)?;
    config.logging.init_with_verbosity(cli.verbose);
    debug!(config = %cli.config.display(), base_url = %config.api.base_url, "Loaded configuration");

    if let Commands::Config(ConfigCommand::Show) = cli.command {
        return config::execute_show(&cli.config, &config);
    }

    let services = Services::from_config(&config, &paths::default_storage())?;

    match cli.command {
        Commands::Register(args) => auth::execute_register(&services, args).await,
        Commands::Login(args) => auth::execute_login(&services, args).await,
        Commands::Logout => auth::execute_logout(&services),
        Commands::Whoami(args) => auth::execute_whoami(&services, args).await,
        Commands::Products(command) => catalog::execute(&services, command).await,
        Commands::Cart(command) => cart::execute(&services, command).await,
        Commands::Checkout(args) => checkout::execute(&services, args).await,
        Commands::Orders(command) => orders::execute(&services, command).await,
        Commands::Users(command) => users::execute(&services, command).await,
        Commands::Payments(command) => payments::execute(&services, command).await,
        Commands::Config(_) => Ok(()),
    }
}
