use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::DeployConfig;
use crate::DeployMode;

/// Role a node process plays in the cluster under test.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Master,
    Tablet,
}

impl fmt::Display for NodeRole {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            NodeRole::Master => write!(f, "master"),
            NodeRole::Tablet => write!(f, "tablet"),
        }
    }
}

/// Node counts plus the execution environment tag of one deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    pub mode: DeployMode,
    pub masters: usize,
    pub tablets: usize,
    /// Build/version under test, forwarded to the process manager
    pub version: String,
}

impl Topology {
    /// Standalone mode collapses to one process per role regardless of
    /// the configured counts.
    pub fn normalized(mut self) -> Self {
        if self.mode == DeployMode::Standalone {
            self.masters = 1;
            self.tablets = 1;
        }
        self
    }

    pub fn node_count(&self) -> usize {
        self.masters + self.tablets
    }
}

impl From<&DeployConfig> for Topology {
    fn from(config: &DeployConfig) -> Self {
        Topology {
            mode: config.mode,
            masters: config.masters,
            tablets: config.tablets,
            version: config.version.clone(),
        }
        .normalized()
    }
}
