use std::collections::BTreeMap;
use std::collections::HashSet;
use std::path::Path;

use tracing::debug;
use tracing::warn;

use super::Case;
use crate::CaseFormatError;
use crate::Error;
use crate::Result;
use crate::SuiteConfig;

/// A parsed suite: valid cases ready to run, plus the malformed ones
/// (skipped, suite continues) and the count removed by level/tag filters.
#[derive(Debug, Default)]
pub struct LoadedSuite {
    pub cases: Vec<Case>,
    pub skipped: Vec<CaseFormatError>,
    pub deselected: usize,
}

/// Level/tag selection derived from [`SuiteConfig`]. Empty lists select
/// everything.
#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
    pub levels: Vec<u32>,
    pub tags: Vec<String>,
}

impl From<&SuiteConfig> for CaseFilter {
    fn from(config: &SuiteConfig) -> Self {
        Self {
            levels: config.levels.clone(),
            tags: config.tags.clone(),
        }
    }
}

impl CaseFilter {
    fn selects(
        &self,
        case: &Case,
    ) -> bool {
        if !self.levels.is_empty() && !self.levels.contains(&case.level) {
            return false;
        }
        if !self.tags.is_empty() && !case.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }
        true
    }
}

/// Parse a case-definition file (a JSON array of cases) into immutable
/// [`Case`] records.
///
/// Performs no network or process activity. A case that fails schema or
/// association validation is collected into `skipped` with the offending
/// field named; the rest of the suite loads normally. Only an unreadable
/// or structurally invalid file is an error.
pub fn load_suite(
    path: &Path,
    filter: &CaseFilter,
) -> Result<LoadedSuite> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| Error::Fatal(format!("cannot read case file {}: {}", path.display(), e)))?;

    let values: Vec<serde_json::Value> = serde_json::from_str(&raw)
        .map_err(|e| Error::Fatal(format!("case file {} is not a JSON array: {}", path.display(), e)))?;

    let mut suite = LoadedSuite::default();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (pos, value) in values.into_iter().enumerate() {
        // Keep the declared id for error reporting even when the rest of
        // the definition does not deserialize.
        let declared_id = value
            .get("caseId")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("<case #{}>", pos));

        let case: Case = match serde_json::from_value(value) {
            Ok(case) => case,
            Err(e) => {
                warn!("skipping malformed case `{}`: {}", declared_id, e);
                suite
                    .skipped
                    .push(CaseFormatError::new(declared_id, "<schema>", e.to_string()));
                continue;
            }
        };

        if !seen_ids.insert(case.case_id.clone()) {
            suite.skipped.push(CaseFormatError::new(
                &case.case_id,
                "caseId",
                "duplicate caseId within suite",
            ));
            continue;
        }

        if let Err(e) = validate_case(&case) {
            warn!("skipping invalid case `{}`: {}", case.case_id, e);
            suite.skipped.push(e);
            continue;
        }

        if !filter.selects(&case) {
            suite.deselected += 1;
            continue;
        }

        suite.cases.push(case);
    }

    debug!(
        "loaded suite from {}: {} cases, {} skipped, {} deselected",
        path.display(),
        suite.cases.len(),
        suite.skipped.len(),
        suite.deselected
    );
    Ok(suite)
}

/// All `{name}` placeholders referenced by a template, in order of
/// appearance. Only identifier-shaped brace contents count; JSON
/// structural braces in body templates are skipped.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        if let Some(end) = after.find('}') {
            let name = &after[..end];
            if crate::dispatch::is_placeholder_name(name) {
                found.push(name.to_string());
                rest = &after[end + 1..];
                continue;
            }
        }
        rest = after;
    }
    found
}

/// Number of dispatched calls a case's parameter sweep will produce:
/// the Cartesian product of all candidate lists. One for a case with no
/// parameters.
pub fn sweep_size(case: &Case) -> usize {
    case.uri_parameters
        .values()
        .chain(case.body_parameters.values())
        .map(|candidates| candidates.len())
        .product()
}

fn validate_case(case: &Case) -> std::result::Result<(), CaseFormatError> {
    let id = &case.case_id;

    if case.case_id.trim().is_empty() {
        return Err(CaseFormatError::new(id, "caseId", "caseId must not be empty"));
    }
    if case.uri.trim().is_empty() {
        return Err(CaseFormatError::new(id, "uri", "uri must not be empty"));
    }

    validate_parameters(id, "uriParameters", &case.uri_parameters)?;
    validate_parameters(id, "bodyParameters", &case.body_parameters)?;

    // The binding sweep merges both maps; a name declared on both sides
    // with diverging candidates would be ambiguous.
    for (name, candidates) in &case.uri_parameters {
        if let Some(other) = case.body_parameters.get(name) {
            if other != candidates {
                return Err(CaseFormatError::new(
                    id,
                    "bodyParameters",
                    format!("parameter `{}` redeclared with different candidates", name),
                ));
            }
        }
    }

    let declared: HashSet<&str> = case
        .uri_parameters
        .keys()
        .chain(case.body_parameters.keys())
        .map(|s| s.as_str())
        .collect();

    for name in placeholders(&case.uri) {
        if !declared.contains(name.as_str()) {
            return Err(CaseFormatError::new(
                id,
                "uri",
                format!("placeholder `{{{}}}` does not resolve to a declared parameter", name),
            ));
        }
    }
    if let Some(body) = &case.body {
        for name in placeholders(body) {
            if !declared.contains(name.as_str()) {
                return Err(CaseFormatError::new(
                    id,
                    "body",
                    format!("placeholder `{{{}}}` does not resolve to a declared parameter", name),
                ));
            }
        }
    }

    if !case.has_expectations() {
        return Err(CaseFormatError::new(
            id,
            "expect",
            "case declares no expectation source",
        ));
    }
    if let Some(expect) = &case.expect {
        if expect.is_empty() {
            return Err(CaseFormatError::new(id, "expect", "expectation has no clauses"));
        }
    }

    // uriExpect / bodyExpect index-align with the binding sweep; a step
    // index beyond the call count can never be checked.
    let calls = sweep_size(case);
    if case.uri_expect.len() > calls {
        return Err(CaseFormatError::new(
            id,
            "uriExpect",
            format!("{} expectations but the parameter sweep dispatches only {} calls", case.uri_expect.len(), calls),
        ));
    }
    if case.body_expect.len() > calls {
        return Err(CaseFormatError::new(
            id,
            "bodyExpect",
            format!("{} expectations but the parameter sweep dispatches only {} calls", case.body_expect.len(), calls),
        ));
    }

    Ok(())
}

fn validate_parameters(
    case_id: &str,
    field: &'static str,
    parameters: &BTreeMap<String, Vec<String>>,
) -> std::result::Result<(), CaseFormatError> {
    for (name, candidates) in parameters {
        if name.trim().is_empty() {
            return Err(CaseFormatError::new(case_id, field, "parameter name must not be empty"));
        }
        if candidates.is_empty() {
            return Err(CaseFormatError::new(
                case_id,
                field,
                format!("parameter `{}` has no candidate values", name),
            ));
        }
    }
    Ok(())
}
