//! registry subcommand
//!
//! Discovers every configured endpoint and prints the registry snapshot as JSON.

use crate::registry::{ProviderRegistry, RegistrySnapshot};
use clap::Args;

/// Arguments for the registry subcommand
#[derive(Args, Debug, Clone)]
pub struct RegistryArgs {
    /// Print single-line JSON instead of pretty output
    #[arg(long)]
    pub compact: bool,
}

/// Execute the registry command
pub async fn execute(args: &RegistryArgs, registry: &ProviderRegistry) -> Result<(), anyhow::Error> {
    registry.initialize().await;
    println!("{}", render(&registry.get_registry_for_llm(), args.compact)?);
    Ok(())
}

/// Serialize a snapshot for output
pub fn render(snapshot: &RegistrySnapshot, compact: bool) -> Result<String, serde_json::Error> {
    if compact {
        serde_json::to_string(snapshot)
    } else {
        serde_json::to_string_pretty(snapshot)
    }
}
