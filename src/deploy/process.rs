use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use parking_lot::Mutex;
use tokio::net::TcpStream;
use tokio::process::Child;
use tokio::process::Command;
use tracing::debug;
use tracing::warn;

use super::NodeRole;
use crate::DeploymentError;

/// Everything the process manager needs to start one node.
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    pub role: NodeRole,
    /// Ordinal among nodes of the same role, used for data dirs
    pub index: usize,
    pub port: u16,
    pub binary: PathBuf,
    pub work_dir: PathBuf,
    pub version: String,
}

/// A reachable node process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub role: NodeRole,
    /// `host:port` of the node's HTTP API
    pub addr: String,
}

impl Endpoint {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// External process-management collaborator: start, health-check and
/// stop one node binary. The engine never touches processes directly.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProcessManager: Send + Sync {
    async fn start(
        &self,
        config: &ProcessConfig,
    ) -> std::result::Result<Endpoint, DeploymentError>;

    async fn healthy(
        &self,
        endpoint: &Endpoint,
    ) -> bool;

    async fn stop(
        &self,
        endpoint: &Endpoint,
    );
}

/// Spawns node binaries on the local machine.
///
/// Children are tracked by endpoint address so `stop` can kill the right
/// process; health is a TCP connect against the node's API port.
pub struct LocalProcessManager {
    children: Mutex<HashMap<String, Child>>,
    connect_timeout: Duration,
}

impl LocalProcessManager {
    pub fn new(connect_timeout: Duration) -> Self {
        Self {
            children: Mutex::new(HashMap::new()),
            connect_timeout,
        }
    }
}

#[async_trait]
impl ProcessManager for LocalProcessManager {
    async fn start(
        &self,
        config: &ProcessConfig,
    ) -> std::result::Result<Endpoint, DeploymentError> {
        let data_dir = config
            .work_dir
            .join(format!("{}-{}", config.role, config.index));

        let child = Command::new(&config.binary)
            .arg("--role")
            .arg(config.role.to_string())
            .arg("--port")
            .arg(config.port.to_string())
            .arg("--data-dir")
            .arg(&data_dir)
            .arg("--version")
            .arg(&config.version)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| DeploymentError::SpawnFailed {
                role: config.role,
                source,
            })?;

        let endpoint = Endpoint {
            role: config.role,
            addr: format!("127.0.0.1:{}", config.port),
        };
        debug!("spawned {} #{} at {}", config.role, config.index, endpoint.addr);

        self.children.lock().insert(endpoint.addr.clone(), child);
        Ok(endpoint)
    }

    async fn healthy(
        &self,
        endpoint: &Endpoint,
    ) -> bool {
        matches!(
            tokio::time::timeout(self.connect_timeout, TcpStream::connect(&endpoint.addr)).await,
            Ok(Ok(_))
        )
    }

    async fn stop(
        &self,
        endpoint: &Endpoint,
    ) {
        let child = self.children.lock().remove(&endpoint.addr);
        if let Some(mut child) = child {
            if let Err(e) = child.kill().await {
                warn!("failed to kill process at {}: {}", endpoint.addr, e);
            }
        }
    }
}
