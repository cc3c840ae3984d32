//! Policy response types

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one policy response action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyResponseStatus {
    Success,
    Warning,
    Failure,
}

impl PolicyResponseStatus {
    pub fn needs_attention(self) -> bool {
        matches!(self, Self::Warning | Self::Failure)
    }
}

/// One action the endpoint ran while applying the policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyResponseAction {
    pub name: String,
    #[serde(default)]
    pub message: String,
    pub status: PolicyResponseStatus,
}

/// One configuration section of the applied policy (malware, events, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfiguration {
    pub name: String,
    pub status: PolicyResponseStatus,
    /// Names of the actions this section depends on
    #[serde(default)]
    pub concerned_actions: Vec<String>,
}

/// Policy response of one endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyResponseDetail {
    pub actions: Vec<PolicyResponseAction>,
    pub configurations: Vec<PolicyConfiguration>,
    pub applied_revision: u64,
    pub timestamp: DateTime<Utc>,
}

impl PolicyResponseDetail {
    /// Number of actions that failed or produced a warning
    pub fn failed_or_warning_action_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| a.status.needs_attention())
            .count()
    }

    /// Failed-or-warning actions per configuration section, keyed by section name
    pub fn attention_count_by_configuration(&self) -> BTreeMap<String, usize> {
        self.configurations
            .iter()
            .map(|config| {
                let count = config
                    .concerned_actions
                    .iter()
                    .filter_map(|name| self.action(name))
                    .filter(|a| a.status.needs_attention())
                    .count();
                (config.name.clone(), count)
            })
            .collect()
    }

    pub fn action(&self, name: &str) -> Option<&PolicyResponseAction> {
        self.actions.iter().find(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(name: &str, status: PolicyResponseStatus) -> PolicyResponseAction {
        PolicyResponseAction {
            name: name.to_string(),
            message: String::new(),
            status,
        }
    }

    fn detail() -> PolicyResponseDetail {
        PolicyResponseDetail {
            actions: vec![
                action("load_config", PolicyResponseStatus::Success),
                action("download_model", PolicyResponseStatus::Failure),
                action("configure_kernel", PolicyResponseStatus::Warning),
            ],
            configurations: vec![
                PolicyConfiguration {
                    name: "malware".to_string(),
                    status: PolicyResponseStatus::Failure,
                    concerned_actions: vec![
                        "load_config".to_string(),
                        "download_model".to_string(),
                    ],
                },
                PolicyConfiguration {
                    name: "events".to_string(),
                    status: PolicyResponseStatus::Warning,
                    concerned_actions: vec![
                        "configure_kernel".to_string(),
                        "missing_action".to_string(),
                    ],
                },
            ],
            applied_revision: 3,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn counts_failed_or_warning_actions() {
        assert_eq!(detail().failed_or_warning_action_count(), 2);
    }

    #[test]
    fn counts_per_configuration_ignore_unknown_actions() {
        let counts = detail().attention_count_by_configuration();
        assert_eq!(counts.get("malware"), Some(&1));
        assert_eq!(counts.get("events"), Some(&1));
    }
}
