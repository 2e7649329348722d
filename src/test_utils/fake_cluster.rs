use std::sync::Arc;

use crate::deploy::ClusterHandle;
use crate::deploy::Endpoint;
use crate::deploy::NodeRole;
use crate::deploy::Topology;
use crate::DeployMode;

/// A cluster handle that points nowhere; for tests that fake the
/// transport and never open a socket.
pub fn fake_cluster_handle() -> Arc<ClusterHandle> {
    Arc::new(ClusterHandle {
        topology: Topology {
            mode: DeployMode::Standalone,
            masters: 1,
            tablets: 1,
            version: "test".into(),
        },
        masters: vec![Endpoint {
            role: NodeRole::Master,
            addr: "127.0.0.1:19527".into(),
        }],
        tablets: vec![Endpoint {
            role: NodeRole::Tablet,
            addr: "127.0.0.1:19528".into(),
        }],
    })
}
