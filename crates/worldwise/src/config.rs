//! CLI configuration: thin wrapper around `worldwise_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--config, --api-url, --timeout, --output, --color).

use std::path::PathBuf;

use clap::ValueEnum;

use worldwise_core::ServiceConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Re-exports from shared crate ────────────────────────────────────

pub use worldwise_config::{Config, config_path, load_config_from, save_config_to};

// ── CLI-specific helpers ────────────────────────────────────────────

/// The config file in effect: `--config`, else the platform path.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config_path)
}

/// Load the config file in effect, plus environment overrides.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(load_config_from(&config_file(global))?)
}

/// Apply flag overrides to a loaded config.
pub fn apply_overrides(mut cfg: Config, global: &GlobalOpts) -> Config {
    if let Some(ref url) = global.api_url {
        cfg.api.base_url.clone_from(url);
    }
    if let Some(ref url) = global.geocoding_url {
        cfg.geocoding.base_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.api.timeout = timeout;
    }
    cfg
}

/// Translate the config + flags into a `ServiceConfig`.
pub fn resolve_service(cfg: &Config) -> Result<ServiceConfig, CliError> {
    Ok(worldwise_config::to_service_config(cfg)?)
}

/// Output format: flag > config > table.
pub fn resolve_output(global: &GlobalOpts, cfg: &Config) -> Result<OutputFormat, CliError> {
    if let Some(format) = global.output {
        return Ok(format);
    }
    OutputFormat::from_str(&cfg.defaults.output, true).map_err(|reason| CliError::Validation {
        field: "defaults.output".into(),
        reason,
    })
}

/// Whether to color output: flag > config > auto.
pub fn resolve_color(global: &GlobalOpts, cfg: &Config) -> Result<bool, CliError> {
    let mode = match global.color {
        Some(mode) => mode,
        None => ColorMode::from_str(&cfg.defaults.color, true).map_err(|reason| {
            CliError::Validation {
                field: "defaults.color".into(),
                reason,
            }
        })?,
    };
    Ok(output::should_color(mode))
}
