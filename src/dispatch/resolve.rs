use std::collections::BTreeMap;

use super::Binding;
use crate::model::Case;
use crate::model::Method;
use crate::CaseFormatError;

/// A case's request with every placeholder substituted for one binding.
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    pub case_id: String,
    /// Position of this call within the binding sweep
    pub call_index: usize,
    pub method: Method,
    /// Resolved uri, still relative to the cluster's API base
    pub uri: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
    pub binding: Binding,
}

/// True for `{name}` contents the engine treats as a placeholder; JSON
/// structural braces in body templates never qualify.
pub(crate) fn is_placeholder_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Substitute every `{name}` placeholder in `template` from the binding.
///
/// Only identifier-shaped brace contents are placeholders; any other
/// `{` (a JSON object in a body template, say) passes through literally.
/// Load-time validation guarantees each placeholder is declared, so a
/// miss here means the binding was built for a different case.
pub fn substitute(
    template: &str,
    binding: &Binding,
) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        if let Some(end) = after.find('}') {
            let name = &after[..end];
            if is_placeholder_name(name) {
                match binding.get(name) {
                    Some(value) => out.push_str(value),
                    None => return Err(name.to_string()),
                }
                rest = &after[end + 1..];
                continue;
            }
        }

        // not a placeholder: literal brace, resume right after it
        out.push('{');
        rest = after;
    }
    out.push_str(rest);
    Ok(out)
}

/// Resolve one call of a case's sweep: substitute uri and body.
pub fn resolve(
    case: &Case,
    binding: &Binding,
    call_index: usize,
) -> std::result::Result<ResolvedRequest, CaseFormatError> {
    let uri = substitute(&case.uri, binding).map_err(|name| {
        CaseFormatError::new(
            &case.case_id,
            "uri",
            format!("no binding for placeholder `{{{}}}`", name),
        )
    })?;

    let body = match &case.body {
        Some(template) => Some(substitute(template, binding).map_err(|name| {
            CaseFormatError::new(
                &case.case_id,
                "body",
                format!("no binding for placeholder `{{{}}}`", name),
            )
        })?),
        None => None,
    };

    Ok(ResolvedRequest {
        case_id: case.case_id.clone(),
        call_index,
        method: case.method,
        uri,
        headers: case.headers.clone(),
        body,
        binding: binding.clone(),
    })
}
