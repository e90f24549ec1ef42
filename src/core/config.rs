//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.clipchat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::agent::script::Pacing;
use crate::backend::oembed::DEFAULT_RELAY_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ClipchatConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub mock: MockConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_backend: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RelayConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MockConfig {
    pub transcript_delay_ms: Option<u64>,
    pub generate_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PacingConfig {
    pub memory_notice_ms: Option<u64>,
    pub transcript_notice_ms: Option<u64>,
    pub generation_notice_ms: Option<u64>,
    pub result_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BACKEND: &str = "oembed";
pub const DEFAULT_TRANSCRIPT_DELAY_MS: u64 = 1500;
pub const DEFAULT_GENERATE_DELAY_MS: u64 = 2200;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub backend: String,
    pub relay_url: String,
    pub transcript_delay: Duration,
    pub generate_delay: Duration,
    pub pacing: Pacing,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.clipchat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".clipchat").join("config.toml"))
}

/// Load config from `~/.clipchat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ClipchatConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ClipchatConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ClipchatConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ClipchatConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: ClipchatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Clipchat Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_backend = "oembed"         # "oembed" or "mock"

# [relay]
# base_url = "https://api.allorigins.win/raw"   # Or set CLIPCHAT_RELAY_URL env var

# [mock]
# transcript_delay_ms = 1500
# generate_delay_ms = 2200

# [pacing]                           # offsets of the scripted status entries
# memory_notice_ms = 1200
# transcript_notice_ms = 2600
# generation_notice_ms = 4200
# result_ms = 5400
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_backend` is from the CLI flag (None = not specified).
pub fn resolve(config: &ClipchatConfig, cli_backend: Option<&str>) -> ResolvedConfig {
    // Backend: CLI → env → config → default
    let backend = cli_backend
        .map(|s| s.to_string())
        .or_else(|| std::env::var("CLIPCHAT_BACKEND").ok())
        .or_else(|| config.general.default_backend.clone())
        .unwrap_or_else(|| DEFAULT_BACKEND.to_string());

    // Relay URL: env → config → default
    let relay_url = std::env::var("CLIPCHAT_RELAY_URL")
        .ok()
        .or_else(|| config.relay.base_url.clone())
        .unwrap_or_else(|| DEFAULT_RELAY_URL.to_string());

    let defaults = Pacing::default();
    let pacing = Pacing {
        memory_notice: ms_or(config.pacing.memory_notice_ms, defaults.memory_notice),
        transcript_notice: ms_or(config.pacing.transcript_notice_ms, defaults.transcript_notice),
        generation_notice: ms_or(config.pacing.generation_notice_ms, defaults.generation_notice),
        result: ms_or(config.pacing.result_ms, defaults.result),
    };

    ResolvedConfig {
        backend,
        relay_url,
        transcript_delay: Duration::from_millis(
            config
                .mock
                .transcript_delay_ms
                .unwrap_or(DEFAULT_TRANSCRIPT_DELAY_MS),
        ),
        generate_delay: Duration::from_millis(
            config
                .mock
                .generate_delay_ms
                .unwrap_or(DEFAULT_GENERATE_DELAY_MS),
        ),
        pacing,
    }
}

fn ms_or(value: Option<u64>, fallback: Duration) -> Duration {
    value.map_or(fallback, Duration::from_millis)
}
