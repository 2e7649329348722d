use std::collections::HashMap;
use std::sync::Arc;

use futures::stream;
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::warn;

use super::CaseState;
use super::CaseVerdict;
use super::FailureCause;
use super::Reporter;
use super::RunRecord;
use super::RunRegistry;
use super::SuiteSummary;
use crate::action::run_actions;
use crate::action::ActionContext;
use crate::deploy::ClusterHandle;
use crate::dispatch::enumerate_bindings;
use crate::dispatch::resolve;
use crate::dispatch::Binding;
use crate::dispatch::HttpSender;
use crate::dispatch::RequestDispatcher;
use crate::matcher::match_call;
use crate::matcher::sources_for_call;
use crate::matcher::MatchReport;
use crate::model::Case;
use crate::model::LoadedSuite;
use crate::HttpConfig;
use crate::RunnerConfig;

/// Drives every case of a suite through its lifecycle state machine.
///
/// The cluster handle is threaded through explicitly and shared
/// read-only; each case owns its own binding and run record.
pub struct CaseRunner {
    handle: Arc<ClusterHandle>,
    sender: Arc<dyn HttpSender>,
    runner_config: RunnerConfig,
    http_config: HttpConfig,
    registry: Arc<RunRegistry>,
    reporter: Arc<dyn Reporter>,
    cancel: CancellationToken,
    /// One lock per configured serial group
    group_locks: HashMap<String, Arc<Mutex<()>>>,
}

impl CaseRunner {
    pub fn new(
        handle: Arc<ClusterHandle>,
        sender: Arc<dyn HttpSender>,
        runner_config: RunnerConfig,
        http_config: HttpConfig,
        reporter: Arc<dyn Reporter>,
        cancel: CancellationToken,
    ) -> Self {
        let group_locks = runner_config
            .serial_groups
            .keys()
            .map(|name| (name.clone(), Arc::new(Mutex::new(()))))
            .collect();

        Self {
            handle,
            sender,
            runner_config,
            http_config,
            registry: Arc::new(RunRegistry::default()),
            reporter,
            cancel,
            group_locks,
        }
    }

    pub fn registry(&self) -> Arc<RunRegistry> {
        self.registry.clone()
    }

    /// Run every case of a loaded suite, up to `workers` concurrently,
    /// and return the summary.
    pub async fn run_suite(
        &self,
        suite: &LoadedSuite,
    ) -> SuiteSummary {
        // Malformed cases were already skipped at load time; record them
        // so the summary accounts for every declared case.
        for format_error in &suite.skipped {
            let mut record = RunRecord::new(&format_error.case_id);
            record.state = CaseState::Done;
            record.verdict = Some(CaseVerdict::Skipped);
            record.failure_detail = Some(format_error.to_string());
            self.reporter.case_finished(&record);
            self.registry.insert(record);
        }

        stream::iter(suite.cases.iter())
            .map(|case| self.run_case(case))
            .buffer_unordered(self.runner_config.workers)
            .collect::<Vec<()>>()
            .await;

        let summary = self.registry.summarize();
        self.reporter.suite_finished(&summary);
        summary
    }

    /// Run one case end to end. tearDown runs exactly once whatever
    /// earlier stage failed; only a case never started skips it.
    pub async fn run_case(
        &self,
        case: &Case,
    ) {
        // Cases sharing declared mutable state run serialized
        let group_lock = self
            .runner_config
            .group_of(&case.case_id)
            .and_then(|name| self.group_locks.get(name).cloned());
        let _guard = match &group_lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        if self.cancel.is_cancelled() {
            self.finish_skipped(&case.case_id, "suite aborted before case start");
            return;
        }

        self.registry.insert(RunRecord::new(&case.case_id));

        let bindings = enumerate_bindings(case);
        // Lifecycle actions run once per case, against the first binding
        let lifecycle_binding = bindings.first().cloned().unwrap_or_default();
        let context = ActionContext::new(
            self.handle.clone(),
            lifecycle_binding,
            self.sender.clone(),
            self.http_config.request_timeout(),
        );

        if self.run_before(case, &context).await {
            if self.run_sweep(case, &bindings).await {
                self.finish_skipped_no_report(&case.case_id, "suite aborted mid-dispatch");
            } else {
                self.decide_verdict(&case.case_id);
                self.run_after(case, &context).await;
            }
        }

        // Unconditional: guarantees no cross-case state leakage
        self.run_teardown(case, &context).await;

        self.registry
            .update(&case.case_id, |r| r.state = CaseState::Done);
        if let Some(record) = self.registry.get(&case.case_id) {
            self.reporter.case_finished(&record);
        }
    }

    async fn run_before(
        &self,
        case: &Case,
        context: &ActionContext,
    ) -> bool {
        self.registry
            .update(&case.case_id, |r| r.state = CaseState::BeforeRunning);

        match run_actions(&case.before_action, context).await {
            Ok(()) => {
                self.registry
                    .update(&case.case_id, |r| r.state = CaseState::BeforeOk);
                true
            }
            Err(e) => {
                warn!("case `{}` beforeAction failed: {}", case.case_id, e);
                self.registry.update(&case.case_id, |r| {
                    r.state = CaseState::BeforeFailed;
                    r.verdict = Some(CaseVerdict::Failed(FailureCause::Setup));
                    r.failure_detail = Some(e.to_string());
                });
                false
            }
        }
    }

    /// Dispatch and match every binding of the sweep. Returns true if
    /// the suite was aborted mid-sweep.
    async fn run_sweep(
        &self,
        case: &Case,
        bindings: &[Binding],
    ) -> bool {
        self.registry
            .update(&case.case_id, |r| r.state = CaseState::Dispatching);

        let dispatcher = RequestDispatcher::new(
            self.sender.clone(),
            self.handle.clone(),
            self.http_config.request_timeout(),
        );

        for (call_index, binding) in bindings.iter().enumerate() {
            if self.cancel.is_cancelled() {
                return true;
            }

            let report = match resolve(case, binding, call_index) {
                Ok(request) => {
                    let outcome = dispatcher.dispatch(&request).await;
                    self.registry
                        .update(&case.case_id, |r| r.dispatched_calls += 1);
                    match outcome {
                        Ok(response) => {
                            self.registry
                                .update(&case.case_id, |r| r.state = CaseState::Matching);
                            let sources = sources_for_call(case, call_index);
                            match_call(&case.case_id, call_index, &sources, &response)
                        }
                        Err(e) => {
                            debug!("case `{}` call #{} dispatch failed: {}", case.case_id, call_index, e);
                            MatchReport::dispatch_failure(&case.case_id, call_index, e)
                        }
                    }
                }
                Err(e) => MatchReport::dispatch_failure(&case.case_id, call_index, e),
            };

            self.registry
                .update(&case.case_id, |r| r.reports.push(report));
        }

        false
    }

    fn decide_verdict(
        &self,
        case_id: &str,
    ) {
        self.registry.update(case_id, |r| {
            let any_dispatch_failure = r
                .reports
                .iter()
                .flat_map(|report| report.outcomes.iter())
                .any(|o| !o.passed && o.source == "dispatch");
            let all_passed = r.reports.iter().all(|report| report.passed());

            if any_dispatch_failure {
                r.state = CaseState::DispatchFailed;
                r.verdict = Some(CaseVerdict::Failed(FailureCause::Dispatch));
            } else if all_passed {
                r.state = CaseState::Passed;
                r.verdict = Some(CaseVerdict::Passed);
            } else {
                r.state = CaseState::Failed;
                r.verdict = Some(CaseVerdict::Failed(FailureCause::Assertion));
            }
        });
    }

    /// afterAction runs only once the request stage completed; its
    /// failure is recorded, never propagated.
    async fn run_after(
        &self,
        case: &Case,
        context: &ActionContext,
    ) {
        if case.after_action.is_empty() {
            return;
        }
        self.registry
            .update(&case.case_id, |r| r.state = CaseState::AfterRunning);
        if let Err(e) = run_actions(&case.after_action, context).await {
            self.registry
                .update(&case.case_id, |r| r.after_error = Some(e.to_string()));
        }
    }

    async fn run_teardown(
        &self,
        case: &Case,
        context: &ActionContext,
    ) {
        self.registry
            .update(&case.case_id, |r| r.state = CaseState::TearingDown);
        if let Err(e) = run_actions(&case.tear_down, context).await {
            warn!("case `{}` tearDown failed: {}", case.case_id, e);
            self.registry
                .update(&case.case_id, |r| r.teardown_error = Some(e.to_string()));
        }
        self.registry
            .update(&case.case_id, |r| r.teardown_runs += 1);
    }

    fn finish_skipped(
        &self,
        case_id: &str,
        detail: &str,
    ) {
        let mut record = RunRecord::new(case_id);
        record.state = CaseState::Done;
        record.verdict = Some(CaseVerdict::Skipped);
        record.failure_detail = Some(detail.to_string());
        self.reporter.case_finished(&record);
        self.registry.insert(record);
    }

    fn finish_skipped_no_report(
        &self,
        case_id: &str,
        detail: &str,
    ) {
        self.registry.update(case_id, |r| {
            r.verdict = Some(CaseVerdict::Skipped);
            r.failure_detail = Some(detail.to_string());
        });
    }
}
