use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SuiteConfig {
    /// Case definition file (a JSON array of cases)
    #[serde(default = "default_case_path")]
    pub case_path: PathBuf,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Run only cases whose level is listed; empty means all levels
    #[serde(default)]
    pub levels: Vec<u32>,

    /// Run only cases carrying at least one listed tag; empty means all
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            case_path: default_case_path(),
            log_dir: default_log_dir(),
            levels: vec![],
            tags: vec![],
        }
    }
}

fn default_case_path() -> PathBuf {
    PathBuf::from("cases/suite.json")
}
fn default_log_dir() -> PathBuf {
    PathBuf::from("/tmp/restcase/logs")
}
