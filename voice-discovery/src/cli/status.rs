//! status subcommand
//!
//! Discovers every configured endpoint and prints one row per endpoint.

use crate::registry::ProviderRegistry;
use crate::types::endpoint::{EndpointInfo, ServiceType};
use clap::Args;

/// Table header for the status output
pub const STATUS_HEADER: &str = "SERVICE\tURL\tPROVIDER\tMODELS\tVOICES\tERROR";

/// Arguments for the status subcommand
#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    /// Show only one service type (tts or stt)
    #[arg(short, long)]
    pub service: Option<ServiceType>,
}

/// Execute the status command
///
/// Returns `true` when every listed endpoint is free of errors.
pub async fn execute(
    args: &StatusArgs,
    registry: &ProviderRegistry,
) -> Result<bool, anyhow::Error> {
    registry.initialize().await;

    let service_types: Vec<ServiceType> = match args.service {
        Some(service_type) => vec![service_type],
        None => ServiceType::ALL.to_vec(),
    };

    let rows = collect_rows(registry, &service_types);
    if rows.is_empty() {
        println!("No endpoints configured");
        return Ok(true);
    }

    println!("{}", STATUS_HEADER);
    let mut all_ok = true;
    for (service_type, info) in &rows {
        all_ok &= !info.has_error();
        println!("{}", format_row(*service_type, info));
    }

    if !all_ok {
        eprintln!("Some endpoints need attention");
    }
    Ok(all_ok)
}

fn collect_rows(
    registry: &ProviderRegistry,
    service_types: &[ServiceType],
) -> Vec<(ServiceType, EndpointInfo)> {
    service_types
        .iter()
        .flat_map(|service_type| {
            registry
                .get_endpoints(*service_type)
                .into_iter()
                .map(move |info| (*service_type, info))
        })
        .collect()
}

/// Format one endpoint as a tab separated row
pub fn format_row(service_type: ServiceType, info: &EndpointInfo) -> String {
    let voices = match service_type {
        ServiceType::Tts => format_list(&info.voices),
        ServiceType::Stt => "-".to_string(),
    };
    let error = info
        .last_error
        .as_ref()
        .map(|e| e.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        service_type,
        info.base_url,
        info.provider_type,
        format_list(&info.models),
        voices,
        error
    )
}

/// Comma separated list, `-` when empty
pub fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(",")
    }
}
