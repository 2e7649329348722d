use crate::model::Case;
use crate::model::Expect;

/// One expectation source of a case, the duck-typed optional fields
/// normalized into a tagged union so evaluation never cascades through
/// null checks.
#[derive(Debug, Clone)]
pub enum ExpectationSource {
    /// Whole-case `expect`, applied to every call of the sweep
    Whole(Expect),
    /// `uriExpect[index]`, aligned with the index-th dispatched call
    UriStep { index: usize, expect: Expect },
    /// `bodyExpect[index]`, aligned with the index-th dispatched call
    BodyStep { index: usize, expect: Expect },
}

impl ExpectationSource {
    pub fn label(&self) -> String {
        match self {
            ExpectationSource::Whole(_) => "expect".to_string(),
            ExpectationSource::UriStep { index, .. } => format!("uriExpect[{}]", index),
            ExpectationSource::BodyStep { index, .. } => format!("bodyExpect[{}]", index),
        }
    }

    pub fn expect(&self) -> &Expect {
        match self {
            ExpectationSource::Whole(expect) => expect,
            ExpectationSource::UriStep { expect, .. } => expect,
            ExpectationSource::BodyStep { expect, .. } => expect,
        }
    }
}

/// Expectation sources applicable to one call of a case's sweep, in
/// evaluation precedence order: whole-case `expect` first, then the
/// index-aligned per-step sources. Calls beyond the step lists are
/// checked against `expect` alone.
pub fn sources_for_call(
    case: &Case,
    call_index: usize,
) -> Vec<ExpectationSource> {
    let mut sources = Vec::new();
    if let Some(expect) = &case.expect {
        sources.push(ExpectationSource::Whole(expect.clone()));
    }
    if let Some(expect) = case.uri_expect.get(call_index) {
        sources.push(ExpectationSource::UriStep {
            index: call_index,
            expect: expect.clone(),
        });
    }
    if let Some(expect) = case.body_expect.get(call_index) {
        sources.push(ExpectationSource::BodyStep {
            index: call_index,
            expect: expect.clone(),
        });
    }
    sources
}
