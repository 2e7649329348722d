use serde_json::Value;

use super::ExpectationOutcome;
use super::ExpectationSource;
use super::MatchReport;
use super::Mismatch;
use crate::dispatch::CapturedResponse;
use crate::model::Expect;

/// Evaluate every expectation source against one captured response.
///
/// Sources are independent: a failing whole-case `expect` never stops
/// the per-step checks, so a single run reports every divergence.
pub fn match_call(
    case_id: &str,
    call_index: usize,
    sources: &[ExpectationSource],
    response: &CapturedResponse,
) -> MatchReport {
    let outcomes = sources
        .iter()
        .map(|source| {
            let mismatches = match_expect(source.expect(), response);
            ExpectationOutcome {
                source: source.label(),
                passed: mismatches.is_empty(),
                mismatches,
            }
        })
        .collect();

    MatchReport {
        case_id: case_id.to_string(),
        call_index,
        outcomes,
    }
}

/// Partial-match one expectation spec against a response. Returns every
/// mismatch; an empty vec means the spec matched.
pub fn match_expect(
    expect: &Expect,
    response: &CapturedResponse,
) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();

    // Status mismatch is always reported, even if the body matches
    if let Some(status) = expect.status {
        if response.status != status {
            mismatches.push(Mismatch {
                clause: "status".to_string(),
                expected: status.to_string(),
                actual: response.status.to_string(),
            });
        }
    }

    // Subset check: declared headers must be present with equal values,
    // extra response headers are ignored
    for (name, expected) in &expect.headers {
        let key = name.to_ascii_lowercase();
        match response.headers.get(&key) {
            Some(actual) if actual == expected => {}
            Some(actual) => mismatches.push(Mismatch {
                clause: format!("header {}", name),
                expected: expected.clone(),
                actual: actual.clone(),
            }),
            None => mismatches.push(Mismatch {
                clause: format!("header {}", name),
                expected: expected.clone(),
                actual: "<absent>".to_string(),
            }),
        }
    }

    if expect.body.is_none() && expect.fields.is_empty() {
        return mismatches;
    }

    let actual_body: Option<Value> = serde_json::from_str(&response.body).ok();

    if let Some(expected_body) = &expect.body {
        match &actual_body {
            Some(actual) if actual == expected_body => {}
            Some(actual) => mismatches.push(Mismatch {
                clause: "body".to_string(),
                expected: expected_body.to_string(),
                actual: actual.to_string(),
            }),
            None => mismatches.push(Mismatch {
                clause: "body".to_string(),
                expected: expected_body.to_string(),
                actual: format!("non-JSON body: {:?}", truncate(&response.body, 120)),
            }),
        }
    }

    for (path, expected) in &expect.fields {
        let actual = actual_body.as_ref().and_then(|body| lookup_path(body, path));
        match actual {
            Some(actual) if actual == expected => {}
            Some(actual) => mismatches.push(Mismatch {
                clause: format!("field {}", path),
                expected: expected.to_string(),
                actual: actual.to_string(),
            }),
            None => mismatches.push(Mismatch {
                clause: format!("field {}", path),
                expected: expected.to_string(),
                actual: "<absent>".to_string(),
            }),
        }
    }

    mismatches
}

/// Resolve a dotted path (`"a.b"`, `"rows.0.name"`) within a JSON tree.
/// Numeric segments index arrays.
pub fn lookup_path<'a>(
    value: &'a Value,
    path: &str,
) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn truncate(
    s: &str,
    max: usize,
) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
