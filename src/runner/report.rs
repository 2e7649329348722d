use tracing::error;
use tracing::info;
use tracing::warn;

use super::CaseVerdict;
use super::RunRecord;

/// Per-suite tallies, the user-visible bottom line.
///
/// Case counts plus per-call counts: a parameter sweep dispatches
/// several calls for one case, and each call passes or fails on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub calls_passed: usize,
    pub calls_failed: usize,
}

/// External test-reporting collaborator: receives each case's terminal
/// record and the suite summary.
pub trait Reporter: Send + Sync {
    fn case_finished(
        &self,
        record: &RunRecord,
    );

    fn suite_finished(
        &self,
        summary: &SuiteSummary,
    );
}

/// Default reporter, logs through `tracing`.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn case_finished(
        &self,
        record: &RunRecord,
    ) {
        match &record.verdict {
            Some(CaseVerdict::Passed) => info!("case `{}` passed", record.case_id),
            Some(CaseVerdict::Failed(cause)) => {
                error!(
                    "case `{}` failed (cause={}): {}",
                    record.case_id,
                    cause,
                    record.failure_detail.as_deref().unwrap_or("expectation mismatch")
                );
                for diff in record.diffs() {
                    error!("case `{}` diff: {}", record.case_id, diff);
                }
            }
            Some(CaseVerdict::Skipped) | None => warn!(
                "case `{}` skipped: {}",
                record.case_id,
                record.failure_detail.as_deref().unwrap_or("unknown")
            ),
        }
        if let Some(e) = &record.after_error {
            warn!("case `{}` afterAction failed: {}", record.case_id, e);
        }
        if let Some(e) = &record.teardown_error {
            warn!("case `{}` tearDown failed: {}", record.case_id, e);
        }
    }

    fn suite_finished(
        &self,
        summary: &SuiteSummary,
    ) {
        info!(
            "suite finished: {} total, {} passed, {} failed, {} skipped ({} calls passed, {} failed)",
            summary.total,
            summary.passed,
            summary.failed,
            summary.skipped,
            summary.calls_passed,
            summary.calls_failed
        );
    }
}
