use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use shiftlog_cli::commands::{early_exits, events, sessions, show_config, summary};
use shiftlog_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // stdout is reserved for report output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    config
        .session
        .validate()
        .context("invalid session configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match &cli.command {
        Some(Commands::Events(args)) => events::run(args, &config)?,
        Some(Commands::Sessions(args)) => sessions::run(args, &config)?,
        Some(Commands::Summary(args)) => summary::run(args, &config)?,
        Some(Commands::EarlyExits(args)) => early_exits::run(args, &config)?,
        Some(Commands::Config) => show_config::run(&config)?,
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
