use std::fmt;

/// One divergence between expectation and response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Which clause diverged: `status`, `header <name>`, `body`,
    /// `field <path>`
    pub clause: String,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for Mismatch {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.clause, self.expected, self.actual
        )
    }
}

/// Outcome of one expectation source against one call.
#[derive(Debug, Clone)]
pub struct ExpectationOutcome {
    /// Source label (`expect`, `uriExpect[0]`, ...) or `dispatch` for a
    /// call that never produced a response
    pub source: String,
    pub passed: bool,
    pub mismatches: Vec<Mismatch>,
}

/// Aggregated result of all expectation sources for one dispatched call.
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub case_id: String,
    pub call_index: usize,
    pub outcomes: Vec<ExpectationOutcome>,
}

impl MatchReport {
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    /// Report for a call whose dispatch failed outright: the failure is
    /// surfaced through the matcher as a non-matching response, not
    /// silently dropped.
    pub fn dispatch_failure(
        case_id: impl Into<String>,
        call_index: usize,
        error: impl fmt::Display,
    ) -> Self {
        Self {
            case_id: case_id.into(),
            call_index,
            outcomes: vec![ExpectationOutcome {
                source: "dispatch".to_string(),
                passed: false,
                mismatches: vec![Mismatch {
                    clause: "dispatch".to_string(),
                    expected: "a response".to_string(),
                    actual: error.to_string(),
                }],
            }],
        }
    }

    /// All diff lines of failed outcomes, for reporting.
    pub fn diffs(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|o| !o.passed)
            .flat_map(|o| {
                o.mismatches
                    .iter()
                    .map(move |m| format!("[{}] {}", o.source, m))
            })
            .collect()
    }
}
