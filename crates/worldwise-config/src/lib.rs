//! Configuration for the worldwise CLI.
//!
//! A TOML file in the platform config directory, overlaid with
//! `WORLDWISE_`-prefixed environment variables, translated into
//! `worldwise_core::ServiceConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use worldwise_core::config::{DEFAULT_API_URL, DEFAULT_GEOCODING_URL};
use worldwise_core::{DEFAULT_MAP_POSITION, Position, ServiceConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSection,

    #[serde(default)]
    pub geocoding: GeocodingSection,

    #[serde(default)]
    pub map: MapSection,

    #[serde(default)]
    pub device: DeviceSection,

    #[serde(default)]
    pub defaults: Defaults,
}

/// The cities collection service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiSection {
    #[serde(default = "default_api_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeocodingSection {
    #[serde(default = "default_geocoding_url")]
    pub base_url: String,
}

impl Default for GeocodingSection {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MapSection {
    /// Where the map focuses before any position is known.
    #[serde(default = "default_map_position")]
    pub default_position: Position,
}

impl Default for MapSection {
    fn default() -> Self {
        Self {
            default_position: default_map_position(),
        }
    }
}

/// Stands in for the device location capability.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DeviceSection {
    /// Reported by "use my position". Unset means unsupported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}
fn default_geocoding_url() -> String {
    DEFAULT_GEOCODING_URL.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_map_position() -> Position {
    DEFAULT_MAP_POSITION
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "worldwise", "worldwise").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("worldwise");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load from `path` + environment. A missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("WORLDWISE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parents.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("{e}: {raw}"),
    })
}

fn check_position(field: &str, position: Position) -> Result<Position, ConfigError> {
    if position.is_valid() {
        Ok(position)
    } else {
        Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("out of range: {position}"),
        })
    }
}

/// Build a `ServiceConfig` from a loaded config.
pub fn to_service_config(cfg: &Config) -> Result<ServiceConfig, ConfigError> {
    Ok(ServiceConfig {
        api_url: parse_url("api.base_url", &cfg.api.base_url)?,
        geocoding_url: parse_url("geocoding.base_url", &cfg.geocoding.base_url)?,
        timeout: Duration::from_secs(cfg.api.timeout),
        default_map_position: check_position("map.default_position", cfg.map.default_position)?,
        device_position: cfg
            .device
            .position
            .map(|p| check_position("device.position", p))
            .transpose()?,
    })
}
