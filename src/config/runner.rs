use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RunnerConfig {
    /// Maximum number of cases running concurrently
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Named groups of case ids that share mutable system-under-test state.
    /// Cases within one group are serialized; membership is a declared
    /// input, never inferred.
    #[serde(default)]
    pub serial_groups: HashMap<String, Vec<String>>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            serial_groups: HashMap::new(),
        }
    }
}

impl RunnerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::InvalidConfig("workers must be at least 1".into()));
        }

        // A case id in two groups would deadlock the per-group locks
        let mut seen = std::collections::HashSet::new();
        for (group, case_ids) in &self.serial_groups {
            for case_id in case_ids {
                if !seen.insert(case_id.as_str()) {
                    return Err(Error::InvalidConfig(format!(
                        "case `{}` appears in more than one serial group (last: `{}`)",
                        case_id, group
                    )));
                }
            }
        }

        Ok(())
    }

    /// Group name a case belongs to, if any.
    pub fn group_of(
        &self,
        case_id: &str,
    ) -> Option<&str> {
        self.serial_groups
            .iter()
            .find(|(_, ids)| ids.iter().any(|id| id == case_id))
            .map(|(name, _)| name.as_str())
    }
}

fn default_workers() -> usize {
    4
}
