use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use super::CaseRunner;
use super::Reporter;
use super::RunRegistry;
use super::SuiteSummary;
use crate::deploy::DeploymentController;
use crate::deploy::ProcessManager;
use crate::deploy::Topology;
use crate::dispatch::HttpSender;
use crate::model::load_suite;
use crate::model::CaseFilter;
use crate::Result;
use crate::Settings;

/// Outcome of one whole suite execution.
pub struct SuiteOutcome {
    pub summary: SuiteSummary,
    pub registry: Arc<RunRegistry>,
}

/// Execute one suite end to end: load cases, deploy the cluster, run
/// every case, tear the cluster down.
///
/// Deployment is a single suite-wide blocking operation; no case runs
/// concurrently with it or with the final teardown. Only a
/// [`DeploymentError`](crate::DeploymentError) is fatal here; case-scoped
/// failures end up in the summary instead.
pub async fn execute_suite(
    settings: &Settings,
    manager: Arc<dyn ProcessManager>,
    sender: Arc<dyn HttpSender>,
    reporter: Arc<dyn Reporter>,
    cancel: CancellationToken,
) -> Result<SuiteOutcome> {
    let filter = CaseFilter::from(&settings.suite);
    let suite = load_suite(&settings.suite.case_path, &filter)?;
    info!(
        "suite loaded: {} cases to run, {} skipped, {} deselected",
        suite.cases.len(),
        suite.skipped.len(),
        suite.deselected
    );

    let mut controller = DeploymentController::new(manager, settings.deploy.clone());
    let topology = Topology::from(&settings.deploy);
    let handle = controller.deploy(&topology).await?;

    let runner = CaseRunner::new(
        handle,
        sender,
        settings.runner.clone(),
        settings.http.clone(),
        reporter,
        cancel,
    );
    let registry = runner.registry();
    let summary = runner.run_suite(&suite).await;

    // Torn down after the last case's tearDown completed
    controller.teardown().await;

    Ok(SuiteOutcome { summary, registry })
}
