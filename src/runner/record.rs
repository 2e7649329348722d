use dashmap::DashMap;

use super::CaseState;
use super::CaseVerdict;
use super::SuiteSummary;
use crate::matcher::MatchReport;

/// Mutable execution state of one case run.
///
/// Lives in the registry keyed by caseId; the case model itself is never
/// written back into.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub case_id: String,
    pub state: CaseState,
    pub verdict: Option<CaseVerdict>,
    /// Human-readable cause for Setup/Dispatch failures and skips
    pub failure_detail: Option<String>,
    /// One report per dispatched call of the sweep
    pub reports: Vec<MatchReport>,
    pub dispatched_calls: usize,
    /// afterAction failure is recorded here, never blocks tearDown
    pub after_error: Option<String>,
    pub teardown_error: Option<String>,
    pub teardown_runs: u32,
}

impl RunRecord {
    pub fn new(case_id: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            state: CaseState::Loaded,
            verdict: None,
            failure_detail: None,
            reports: Vec::new(),
            dispatched_calls: 0,
            after_error: None,
            teardown_error: None,
            teardown_runs: 0,
        }
    }

    /// Every diff line across all call reports.
    pub fn diffs(&self) -> Vec<String> {
        self.reports.iter().flat_map(|r| r.diffs()).collect()
    }
}

/// Concurrent registry of run records, keyed by caseId.
#[derive(Debug, Default)]
pub struct RunRegistry {
    records: DashMap<String, RunRecord>,
}

impl RunRegistry {
    pub fn insert(
        &self,
        record: RunRecord,
    ) {
        self.records.insert(record.case_id.clone(), record);
    }

    /// Apply a mutation to one case's record, creating it on first use.
    pub fn update<F>(
        &self,
        case_id: &str,
        mutate: F,
    ) where
        F: FnOnce(&mut RunRecord),
    {
        let mut entry = self
            .records
            .entry(case_id.to_string())
            .or_insert_with(|| RunRecord::new(case_id));
        mutate(entry.value_mut());
    }

    pub fn get(
        &self,
        case_id: &str,
    ) -> Option<RunRecord> {
        self.records.get(case_id).map(|r| r.value().clone())
    }

    pub fn snapshot(&self) -> Vec<RunRecord> {
        self.records.iter().map(|r| r.value().clone()).collect()
    }

    pub fn summarize(&self) -> SuiteSummary {
        let mut summary = SuiteSummary::default();
        for record in self.records.iter() {
            summary.total += 1;
            match record.verdict {
                Some(CaseVerdict::Passed) => summary.passed += 1,
                Some(CaseVerdict::Failed(_)) => summary.failed += 1,
                Some(CaseVerdict::Skipped) | None => summary.skipped += 1,
            }
            for report in &record.reports {
                if report.passed() {
                    summary.calls_passed += 1;
                } else {
                    summary.calls_failed += 1;
                }
            }
        }
        summary
    }
}
