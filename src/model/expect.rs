use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// Partial-match specification over an HTTP response.
///
/// Every field is optional; an absent field means "don't care", never
/// "must be absent". Header matching is a subset check. `body` asserts
/// full structural equality of the JSON body; `fields` asserts equality
/// at dotted paths (`"a.b"` addresses `{"a":{"b":...}}`) and ignores
/// everything else in the body.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Expect {
    pub status: Option<u16>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<serde_json::Value>,
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl Expect {
    /// An expectation with no clauses matches everything; the loader
    /// rejects these as almost certainly an authoring mistake.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.headers.is_empty()
            && self.body.is_none()
            && self.fields.is_empty()
    }
}
