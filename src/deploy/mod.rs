//! Deployment Controller
//!
//! Stands up the cluster under test (standalone or clustered) once per
//! suite, exposes its endpoints through a shared [`ClusterHandle`], and
//! tears everything down when the last case finishes:
//! - [`Topology`] - node counts and execution environment
//! - [`ProcessManager`] - external process-management collaborator
//! - [`DeploymentController`] - deploy/teardown with ready-state polling
//!
//! Only the controller mutates cluster membership; every case sees the
//! handle read-only.

mod controller;
mod handle;
mod process;
mod topology;

pub use controller::*;
pub use handle::*;
pub use process::*;
pub use topology::*;
