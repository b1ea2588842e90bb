//! Engine Configuration Module
//!
//! Loads [`EngineConfig`] from an optional TOML file with environment variable overrides.
//! Every field has a default, so an empty source yields a working configuration.

use anyhow::{Context, Result};
use config_crate::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Prefix for environment overrides, e.g. `PAIRPOOL__INVARIANT_CHECKS=false`
pub const ENV_PREFIX: &str = "PAIRPOOL";

/// Top-level engine configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Assert the fee-adjusted constant-product post-condition after every swap
    pub invariant_checks: bool,

    /// Logging output settings
    pub logging: LoggingConfig,
}

/// Logging output settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"amm=debug,info"`
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            invariant_checks: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from an optional file with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            if path.exists() {
                info!("Loading engine config: {:?}", path);
            } else {
                warn!("Engine config not found: {:?}", path);
            }
            builder = builder.add_source(File::from(path).required(true));
        }

        // Override with environment variables (PAIRPOOL__ prefix, `__` between nested keys)
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to build engine configuration")?;

        let engine: Self = config
            .try_deserialize()
            .context("Failed to deserialize engine configuration")?;

        if !engine.invariant_checks {
            warn!("Swap invariant checks are disabled");
        }
        debug!(?engine, "Engine configuration loaded");
        Ok(engine)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .context("Failed to parse engine configuration")?
            .try_deserialize()
            .context("Failed to deserialize engine configuration")
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize engine configuration")
    }
}

/// Convenience function to load configuration with defaults
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    EngineConfig::load(path)
}
