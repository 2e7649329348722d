use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use tokio::time::sleep;
use tracing::info;
use tracing::warn;

use super::ClusterHandle;
use super::Endpoint;
use super::NodeRole;
use super::ProcessConfig;
use super::ProcessManager;
use super::Topology;
use crate::DeployConfig;
use crate::DeploymentError;

/// Deploys and tears down the cluster under test.
///
/// `deploy` is idempotent against partial prior state: any previous
/// deployment under this controller is torn down first. `teardown` may
/// be called repeatedly; after the first call it is a no-op.
pub struct DeploymentController {
    manager: Arc<dyn ProcessManager>,
    config: DeployConfig,
    current: Option<Arc<ClusterHandle>>,
}

impl DeploymentController {
    pub fn new(
        manager: Arc<dyn ProcessManager>,
        config: DeployConfig,
    ) -> Self {
        Self {
            manager,
            config,
            current: None,
        }
    }

    /// Stand up the requested topology and wait until every node reports
    /// ready.
    ///
    /// # Errors
    /// [`DeploymentError::NotReady`] if any node misses the ready
    /// timeout; already-started processes are stopped before returning.
    pub async fn deploy(
        &mut self,
        topology: &Topology,
    ) -> std::result::Result<Arc<ClusterHandle>, DeploymentError> {
        if self.current.is_some() {
            warn!("previous deployment still registered, tearing it down first");
            self.teardown().await;
        }

        let topology = topology.clone().normalized();
        if topology.masters == 0 || topology.tablets == 0 {
            return Err(DeploymentError::InvalidTopology(format!(
                "need at least one node per role, got {} masters / {} tablets",
                topology.masters, topology.tablets
            )));
        }

        // Nodes take consecutive ports; the whole range must fit below
        // the port-number ceiling.
        let last_port = self.config.base_port as usize + topology.node_count() - 1;
        if last_port > u16::MAX as usize {
            return Err(DeploymentError::InvalidTopology(format!(
                "{} nodes from base_port {} would need port {}, beyond the maximum {}",
                topology.node_count(),
                self.config.base_port,
                last_port,
                u16::MAX
            )));
        }

        info!(
            "deploying {:?} topology: {} masters, {} tablets, version {}",
            topology.mode, topology.masters, topology.tablets, topology.version
        );

        let mut started: Vec<Endpoint> = Vec::with_capacity(topology.node_count());

        for (role, count) in [
            (NodeRole::Master, topology.masters),
            (NodeRole::Tablet, topology.tablets),
        ] {
            for index in 0..count {
                let process = ProcessConfig {
                    role,
                    index,
                    port: self.config.base_port + started.len() as u16,
                    binary: self.config.binary_path.clone(),
                    work_dir: self.config.work_dir.clone(),
                    version: topology.version.clone(),
                };

                match self.manager.start(&process).await {
                    Ok(endpoint) => started.push(endpoint),
                    Err(e) => {
                        self.stop_all(&started).await;
                        return Err(e);
                    }
                }
            }
        }

        if let Err(e) = self.wait_ready(&started).await {
            self.stop_all(&started).await;
            return Err(e);
        }

        let (masters, tablets) = started
            .into_iter()
            .partition(|e| e.role == NodeRole::Master);
        let handle = Arc::new(ClusterHandle {
            topology,
            masters,
            tablets,
        });
        self.current = Some(handle.clone());
        info!("cluster ready at {}", handle.api_base());
        Ok(handle)
    }

    /// Stop every process of the current deployment and release the
    /// handle. Safe to call when nothing is deployed.
    pub async fn teardown(&mut self) {
        let Some(handle) = self.current.take() else {
            return;
        };
        info!("tearing down cluster at {}", handle.api_base());
        let endpoints: Vec<Endpoint> = handle.endpoints().cloned().collect();
        self.stop_all(&endpoints).await;
    }

    async fn stop_all(
        &self,
        endpoints: &[Endpoint],
    ) {
        for endpoint in endpoints {
            self.manager.stop(endpoint).await;
        }
    }

    async fn wait_ready(
        &self,
        endpoints: &[Endpoint],
    ) -> std::result::Result<(), DeploymentError> {
        let timeout = Duration::from_millis(self.config.ready_timeout_in_ms);
        let interval = Duration::from_millis(self.config.health_poll_interval_in_ms);
        let deadline = Instant::now() + timeout;

        for endpoint in endpoints {
            loop {
                if self.manager.healthy(endpoint).await {
                    break;
                }
                if Instant::now() >= deadline {
                    return Err(DeploymentError::NotReady {
                        role: endpoint.role,
                        endpoint: endpoint.addr.clone(),
                        waited: timeout,
                    });
                }
                sleep(interval).await;
            }
        }
        Ok(())
    }
}
