//! voice-discovery CLI Entry Point

use clap::Parser;
use voice_discovery::cli::{self, Cli, Commands};
use voice_discovery::{logging, ProviderRegistry};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = cli.debug.then_some("debug");
    if let Err(e) = logging::init(level) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = cli.discovery.into_config()?;
    tracing::debug!(config = ?config, "Loaded discovery configuration");
    let registry = ProviderRegistry::new(config);

    match cli.command {
        Commands::Status(args) => cli::status::execute(&args, &registry).await,
        Commands::Registry(args) => {
            cli::registry::execute(&args, &registry).await?;
            Ok(true)
        }
    }
}
