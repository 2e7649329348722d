use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Execution environment of the cluster under test.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeployMode {
    /// Single master, single tablet, one machine
    Standalone,
    /// Full multi-node topology
    Cluster,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeployConfig {
    #[serde(default = "default_mode")]
    pub mode: DeployMode,

    /// Master node count (forced to 1 in standalone mode)
    #[serde(default = "default_masters")]
    pub masters: usize,

    /// Tablet node count (forced to 1 in standalone mode)
    #[serde(default = "default_tablets")]
    pub tablets: usize,

    /// Build/version tag of the binary under test
    #[serde(default = "default_version")]
    pub version: String,

    /// Path to the node binary
    #[serde(default = "default_binary_path")]
    pub binary_path: PathBuf,

    /// Root directory for per-node data/log files
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    /// First port to assign; nodes take consecutive ports from here
    #[serde(default = "default_base_port")]
    pub base_port: u16,

    #[serde(default = "default_ready_timeout_in_ms")]
    pub ready_timeout_in_ms: u64,

    #[serde(default = "default_health_poll_interval_in_ms")]
    pub health_poll_interval_in_ms: u64,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            masters: default_masters(),
            tablets: default_tablets(),
            version: default_version(),
            binary_path: default_binary_path(),
            work_dir: default_work_dir(),
            base_port: default_base_port(),
            ready_timeout_in_ms: default_ready_timeout_in_ms(),
            health_poll_interval_in_ms: default_health_poll_interval_in_ms(),
        }
    }
}

impl DeployConfig {
    /// Validates deployment configuration consistency
    /// # Errors
    /// Returns `Error::InvalidConfig` if any configuration rules are violated
    pub fn validate(&self) -> Result<()> {
        if self.mode == DeployMode::Cluster && (self.masters == 0 || self.tablets == 0) {
            return Err(Error::InvalidConfig(
                "cluster mode requires at least one master and one tablet".into(),
            ));
        }

        if self.base_port == 0 {
            return Err(Error::InvalidConfig(
                "base_port must specify a non-zero port".into(),
            ));
        }

        if self.ready_timeout_in_ms < self.health_poll_interval_in_ms {
            return Err(Error::InvalidConfig(format!(
                "ready_timeout_in_ms ({}) is below health_poll_interval_in_ms ({})",
                self.ready_timeout_in_ms, self.health_poll_interval_in_ms
            )));
        }

        Ok(())
    }
}

fn default_mode() -> DeployMode {
    DeployMode::Standalone
}
fn default_masters() -> usize {
    2
}
fn default_tablets() -> usize {
    3
}
fn default_version() -> String {
    "main".to_string()
}
fn default_binary_path() -> PathBuf {
    PathBuf::from("./bin/tablet-server")
}
fn default_work_dir() -> PathBuf {
    PathBuf::from("/tmp/restcase")
}
fn default_base_port() -> u16 {
    9520
}
fn default_ready_timeout_in_ms() -> u64 {
    30_000
}
fn default_health_poll_interval_in_ms() -> u64 {
    500
}
