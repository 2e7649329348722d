use std::collections::BTreeMap;

use crate::model::Case;

/// One concrete assignment of values to a case's declared parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding(BTreeMap<String, String>);

impl Binding {
    pub fn get(
        &self,
        name: &str,
    ) -> Option<&str> {
        self.0.get(name).map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.0.insert(name.into(), value.into());
    }
}

/// Enumerate the full parameter sweep of a case: the Cartesian product
/// of every declared parameter's candidate list.
///
/// Pure and deterministic: parameters are taken in name order, the last
/// parameter varies fastest, so `uriExpect[i]` aligns with the same call
/// on every run. A case without parameters yields exactly one empty
/// binding.
pub fn enumerate_bindings(case: &Case) -> Vec<Binding> {
    // Names declared on both sides were validated identical at load time
    let mut merged: BTreeMap<&str, &Vec<String>> = BTreeMap::new();
    for (name, candidates) in case.uri_parameters.iter().chain(case.body_parameters.iter()) {
        merged.insert(name.as_str(), candidates);
    }

    let mut bindings = vec![Binding::default()];
    for (name, candidates) in merged {
        let mut next = Vec::with_capacity(bindings.len() * candidates.len());
        for binding in &bindings {
            for value in candidates {
                let mut expanded = binding.clone();
                expanded.set(name, value);
                next.push(expanded);
            }
        }
        bindings = next;
    }
    bindings
}
