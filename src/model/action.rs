use serde::Deserialize;
use serde::Serialize;

use super::Method;

/// A primitive setup/teardown operation against the system under test.
///
/// Each of beforeAction / afterAction / tearDown is an ordered list of
/// these; execution is strict first-failure-stops.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// Run a DDL/DML statement through the statement endpoint
    Execute { statement: String },

    /// Insert rows into a table through the data endpoint
    Insert {
        table: String,
        rows: serde_json::Value,
    },

    /// Pause, e.g. to let an async DDL settle
    Sleep { millis: u64 },

    /// Nested raw HTTP call against the cluster API
    Http {
        method: Method,
        uri: String,
        #[serde(default)]
        body: Option<String>,
    },
}

impl Action {
    /// Short label for logs and `ActionError` messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Execute { .. } => "execute",
            Action::Insert { .. } => "insert",
            Action::Sleep { .. } => "sleep",
            Action::Http { .. } => "http",
        }
    }
}
