use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::Action;
use super::Expect;

/// HTTP verb of a case's request.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
}

impl Default for Method {
    fn default() -> Self {
        Method::Get
    }
}

impl fmt::Display for Method {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
        };
        write!(f, "{}", s)
    }
}

impl From<Method> for reqwest::Method {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
            Method::Head => reqwest::Method::HEAD,
        }
    }
}

/// One declarative test scenario: request + lifecycle + expectations.
///
/// Parsed once at suite-load time and never mutated afterwards. Parameter
/// maps are ordered (`BTreeMap`) so the binding sweep enumerates
/// deterministically across runs.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub case_id: String,

    // Human metadata, used for selection/filtering only
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub level: u32,

    // Request spec
    pub uri: String,
    #[serde(default)]
    pub method: Method,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub uri_parameters: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub body_parameters: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub body: Option<String>,

    // Lifecycle; absent means no-op
    #[serde(default)]
    pub before_action: Vec<Action>,
    #[serde(default)]
    pub after_action: Vec<Action>,
    #[serde(default)]
    pub tear_down: Vec<Action>,

    // Verification; any non-empty subset may be used
    #[serde(default)]
    pub expect: Option<Expect>,
    #[serde(default)]
    pub uri_expect: Vec<Expect>,
    #[serde(default)]
    pub body_expect: Vec<Expect>,
}

impl Case {
    /// True if at least one expectation source is declared.
    pub fn has_expectations(&self) -> bool {
        self.expect.is_some() || !self.uri_expect.is_empty() || !self.body_expect.is_empty()
    }
}
