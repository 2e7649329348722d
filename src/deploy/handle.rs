use super::Endpoint;
use super::Topology;

/// Opaque reference to a running deployment.
///
/// Shared read-only (`Arc`) by all concurrent cases; only the
/// [`DeploymentController`](super::DeploymentController) ever changes
/// membership, so the handle itself carries no locks.
#[derive(Debug, Clone)]
pub struct ClusterHandle {
    pub topology: Topology,
    pub masters: Vec<Endpoint>,
    pub tablets: Vec<Endpoint>,
}

impl ClusterHandle {
    /// Base URL of the REST API, served by the first master.
    pub fn api_base(&self) -> String {
        self.masters[0].base_url()
    }

    /// Statement endpoint used by `execute` action primitives.
    pub fn statement_url(&self) -> String {
        format!("{}/v1/statement", self.api_base())
    }

    /// Row-insert endpoint used by `insert` action primitives.
    pub fn insert_url(
        &self,
        table: &str,
    ) -> String {
        format!("{}/v1/tables/{}/rows", self.api_base(), table)
    }

    /// Resolve a case's (possibly relative) uri to a full URL.
    pub fn resolve_url(
        &self,
        uri: &str,
    ) -> String {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            uri.to_string()
        } else {
            format!("{}{}", self.api_base(), uri)
        }
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.masters.iter().chain(self.tablets.iter())
    }
}
