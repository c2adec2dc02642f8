//! Expiry sweep configuration loading from config.toml
//!
//! The sweeper binary reads how often it should expire overdue gifts from the
//! `[sweep]` table. Every key is optional; a missing file means defaults.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sweep: SweepConfig,
}

/// Settings for the periodic expiry sweep
#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    /// Seconds between two sweeps
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

const fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL_SECS
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
        }
    }
}

impl SweepConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Loads the sweep configuration from a TOML file
///
/// # Errors
/// Returns `Error::Config` if the file cannot be read, the TOML is invalid, or the
/// interval is zero.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    if config.sweep.interval_secs == 0 {
        return Err(Error::Config {
            message: "sweep.interval_secs must be greater than zero".to_string(),
        });
    }
    Ok(config)
}

/// Loads ./config.toml, falling back to defaults when the file does not exist.
pub fn load_default_config() -> Result<Config> {
    let path = Path::new("config.toml");
    if !path.exists() {
        tracing::info!("No config.toml found, using default sweep settings");
        return Ok(Config::default());
    }
    load_config(path)
}
