//! Error Hierarchy for the Case Execution Engine
//!
//! Defines error types for a declarative REST test-case engine,
//! categorized by execution stage and blast radius: only deployment
//! failures are fatal to a suite, everything else is scoped to one case.

use std::time::Duration;

use config::ConfigError;

use crate::deploy::NodeRole;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cluster-under-test failed to deploy or tear down (fatal to the suite)
    #[error(transparent)]
    Deployment(#[from] DeploymentError),

    /// Malformed case definition (the case is skipped, the suite continues)
    #[error(transparent)]
    CaseFormat(#[from] CaseFormatError),

    /// Setup/teardown primitive failed (case-scoped)
    #[error(transparent)]
    Action(#[from] ActionError),

    /// Network or timeout failure while dispatching a request (case-scoped)
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Engine configuration loading failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Configuration rule violations detected after deserialization
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unrecoverable failures requiring suite termination
    #[error("Fatal error: {0}")]
    Fatal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    /// Requested node counts make no sense for the requested mode
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    /// Process could not be spawned at all
    #[error("Failed to spawn {role} process: {source}")]
    SpawnFailed {
        role: NodeRole,
        #[source]
        source: std::io::Error,
    },

    /// Process started but never reached a ready state
    #[error("{role} at {endpoint} not ready after {waited:?}")]
    NotReady {
        role: NodeRole,
        endpoint: String,
        waited: Duration,
    },

    /// Stop request against a process that refused to die
    #[error("Failed to stop process at {endpoint}: {reason}")]
    StopFailed { endpoint: String, reason: String },
}

/// A case definition that violates the schema or its internal associations.
///
/// Names the offending case and field so a report reader can fix the
/// definition without re-running the suite.
#[derive(Debug, Clone, thiserror::Error)]
#[error("case `{case_id}`: field `{field}`: {reason}")]
pub struct CaseFormatError {
    pub case_id: String,
    pub field: &'static str,
    pub reason: String,
}

impl CaseFormatError {
    pub fn new(
        case_id: impl Into<String>,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            case_id: case_id.into(),
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// Primitive rejected by the system under test
    #[error("action #{index} ({kind}) failed: {cause}")]
    Failed {
        index: usize,
        kind: &'static str,
        cause: String,
    },

    /// Primitive's underlying HTTP call never completed
    #[error("action #{index} ({kind}) dispatch failed: {source}")]
    Dispatch {
        index: usize,
        kind: &'static str,
        #[source]
        source: DispatchError,
    },
}

impl ActionError {
    /// Index of the primitive that failed, for report aggregation.
    pub fn index(&self) -> usize {
        match self {
            ActionError::Failed { index, .. } => *index,
            ActionError::Dispatch { index, .. } => *index,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// HTTP client could not be constructed at startup
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: Box<reqwest::Error>,
    },

    /// Request did not complete within the configured timeout
    #[error("request to {url} timed out after {duration:?}")]
    Timeout { url: String, duration: Duration },

    /// Malformed target URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A declared header name or value the transport refuses to carry
    #[error("Invalid header `{name}`: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Connection-level failures from the HTTP transport
    #[error("transport failure for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<reqwest::Error>,
    },

    /// Response arrived but its body could not be read
    #[error("failed to read response body from {url}: {source}")]
    BodyRead {
        url: String,
        #[source]
        source: Box<reqwest::Error>,
    },
}
