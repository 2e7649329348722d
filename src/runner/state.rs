use std::fmt;

/// Per-case execution state.
///
/// `Loaded → (BeforeRunning → BeforeFailed | BeforeOk) → (Dispatching →
/// DispatchFailed | Matching) → (Passed | Failed) →
/// AfterRunning → TearingDown → Done`; Done is reached from every
/// failure branch as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseState {
    Loaded,
    BeforeRunning,
    BeforeFailed,
    BeforeOk,
    Dispatching,
    DispatchFailed,
    Matching,
    Passed,
    Failed,
    AfterRunning,
    TearingDown,
    Done,
}

/// Which stage a failed case failed in; reported to the test-runner
/// collaborator so failures are triaged without reading logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// beforeAction primitive failed
    Setup,
    /// network/timeout while dispatching, or the request could not be
    /// resolved
    Dispatch,
    /// at least one expectation source mismatched
    Assertion,
}

impl fmt::Display for FailureCause {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            FailureCause::Setup => write!(f, "setup"),
            FailureCause::Dispatch => write!(f, "dispatch"),
            FailureCause::Assertion => write!(f, "assertion"),
        }
    }
}

/// Terminal outcome of one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseVerdict {
    Passed,
    Failed(FailureCause),
    /// Malformed at load time, deselected, or aborted before start
    Skipped,
}
