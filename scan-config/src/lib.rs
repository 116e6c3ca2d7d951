//! Configuration for the scan engine's chunking parameters.
//!
//! Layered loading: built-in defaults, an optional file, then environment
//! variables, each able to override the last.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;

pub use error::ConfigError;

/// Tuning knobs for `Scanner`/`ScannerGroup` chunk windowing.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Validate)]
pub struct ScanConfig {
    #[validate(range(min = 1))]
    pub block_size: usize,
    #[validate(range(min = 1))]
    pub overlap: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            block_size: 1024 * 1024,
            overlap: 1024,
        }
    }
}

impl ScanConfig {
    /// Loads configuration from default values, an optional
    /// `config/scan.yaml`, and `SCAN_`-prefixed environment variables, in
    /// that order of increasing precedence.
    ///
    /// # Panics
    /// If validation fails on the merged configuration.
    pub fn load() -> Result<Self, ConfigError> {
        let figment = Figment::from(Serialized::defaults(ScanConfig::default()));

        let figment = if Path::new("config/scan.yaml").exists() {
            figment.merge(Yaml::file("config/scan.yaml"))
        } else {
            figment
        };

        figment
            .merge(Env::prefixed("SCAN_"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Loads configuration from a specific YAML file, for tests or
    /// explicit overrides, still allowing `SCAN_`-prefixed env vars to win.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(
                path.to_string_lossy().to_string(),
            )));
        }

        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("SCAN_"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
