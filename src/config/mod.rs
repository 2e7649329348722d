//! Configuration management for the case execution engine.
//!
//! Provides hierarchical configuration loading with priority:
//! 1. Default values (hardcoded)
//! 2. Optional base config file (`config/restcase.toml`)
//! 3. Explicit override file passed by the caller
//! 4. Environment variables (highest priority, `RESTCASE__` prefix)

mod deploy;
mod http;
mod runner;
mod suite;
pub use deploy::*;
pub use http::*;
pub use runner::*;
pub use suite::*;

#[cfg(test)]
mod config_test;

//---
use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::Error;
use crate::Result;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Suite-level inputs: case file location, log dir, case selection
    #[serde(default)]
    pub suite: SuiteConfig,
    /// Cluster-under-test topology and process management
    #[serde(default)]
    pub deploy: DeployConfig,
    /// HTTP client parameters for dispatch and action primitives
    #[serde(default)]
    pub http: HttpConfig,
    /// Scheduling: worker count and serial groups
    #[serde(default)]
    pub runner: RunnerConfig,
}

impl Settings {
    /// Load configuration from layered sources.
    ///
    /// # Arguments
    /// * `override_path` - Optional path to a caller-supplied config file,
    ///   merged on top of the base file and below environment variables
    ///
    /// # Returns
    /// Merged and validated configuration
    pub fn load(override_path: Option<&str>) -> Result<Self> {
        let mut config = Config::builder();

        // 1. Base config (optional)
        config = config.add_source(File::with_name("config/restcase").required(false));

        // 2. Caller override
        if let Some(path) = override_path {
            config = config.add_source(File::with_name(path).required(true));
        }

        // 3. Environment variables (highest priority)
        config = config.add_source(
            Environment::with_prefix("RESTCASE")
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        let settings: Settings = config.build()?.try_deserialize().map_err(Error::Config)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validates cross-section configuration consistency.
    pub fn validate(&self) -> Result<()> {
        self.deploy.validate()?;
        self.http.validate()?;
        self.runner.validate()?;
        Ok(())
    }
}
