//! # PairPool Configuration
//!
//! Engine configuration loading and tracing setup for processes that embed the
//! PairPool accounting engine.
//!
//! ## Features
//!
//! - **Engine Settings**: invariant checking toggle, enabled unless explicitly turned off
//! - **Layered Sources**: built-in defaults, optional TOML file, `PAIRPOOL__*` environment overrides
//! - **Logging**: `tracing-subscriber` installation with level filter and optional JSON output
//!
//! ## Usage
//!
//! ```rust,no_run
//! use config::{init_tracing, EngineConfig};
//!
//! let config = EngineConfig::load(Some(std::path::Path::new("config/engine.toml")))?;
//! init_tracing(&config.logging)?;
//! assert!(config.invariant_checks);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod engine;
pub mod logging;

pub use engine::{load_config, EngineConfig, LoggingConfig, ENV_PREFIX};
pub use logging::init_tracing;
