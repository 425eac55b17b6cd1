//! CLI module for voice-discovery
//!
//! Provides command-line inspection of the speech provider registry.

pub mod registry;
pub mod status;

use crate::common::error::ConfigError;
use crate::config::DiscoveryConfig;
use clap::{Args, Parser, Subcommand};

/// voice-discovery - Discover TTS/STT providers and inspect their capabilities
#[derive(Parser, Debug)]
#[command(name = "voice-discovery")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    VOICEMODE_TTS_BASE_URLS           Comma separated TTS base URLs (priority order)
    VOICEMODE_STT_BASE_URLS           Comma separated STT base URLs (priority order)
    OPENAI_API_KEY                    API key for model listing
    VOICEMODE_DISCOVERY_TIMEOUT_SECS  Model listing timeout (default: 10)
    VOICEMODE_PROBE_TIMEOUT_SECS      Liveness/voice probe timeout (default: 5)
    VOICE_DISCOVERY_LOG_LEVEL         Log level (default: info)
"#)]
pub struct Cli {
    /// Endpoint overrides shared by all subcommands
    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover all endpoints and print a status table
    Status(status::StatusArgs),
    /// Discover all endpoints and print the registry as JSON
    Registry(registry::RegistryArgs),
}

/// Endpoint configuration overrides
#[derive(Args, Debug, Clone, Default)]
pub struct DiscoveryArgs {
    /// TTS base URL (repeatable, replaces VOICEMODE_TTS_BASE_URLS)
    #[arg(long = "tts-url", global = true, value_name = "URL")]
    pub tts_urls: Vec<String>,

    /// STT base URL (repeatable, replaces VOICEMODE_STT_BASE_URLS)
    #[arg(long = "stt-url", global = true, value_name = "URL")]
    pub stt_urls: Vec<String>,

    /// API key used for model listing
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,
}

impl DiscoveryArgs {
    /// Build the discovery configuration from the environment and these overrides
    pub fn into_config(self) -> Result<DiscoveryConfig, ConfigError> {
        self.apply(DiscoveryConfig::from_env())
    }

    /// Apply the overrides on top of an existing configuration
    pub fn apply(self, mut config: DiscoveryConfig) -> Result<DiscoveryConfig, ConfigError> {
        if !self.tts_urls.is_empty() {
            config = config.with_tts_urls(&self.tts_urls);
        }
        if !self.stt_urls.is_empty() {
            config = config.with_stt_urls(&self.stt_urls);
        }
        if let Some(api_key) = self.api_key.filter(|key| !key.trim().is_empty()) {
            config = config.with_api_key(api_key);
        }
        config.validate()?;
        Ok(config)
    }
}
