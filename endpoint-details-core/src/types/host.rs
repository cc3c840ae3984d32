//! Host metadata type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Agent identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentInfo {
    pub id: String,
    pub version: String,
}

/// Host identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostInfo {
    pub hostname: String,
    #[serde(default)]
    pub os_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip: Vec<String>,
}

/// Whether the endpoint runs the latest revision of its policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyApplyStatus {
    Success,
    Warning,
    Failure,
}

/// Policy assigned to the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyVersionInfo {
    pub id: String,
    pub name: String,
    pub revision: u64,
    pub status: PolicyApplyStatus,
}

/// Current agent status as reported by fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostStatus {
    Healthy,
    Unhealthy,
    Updating,
    Offline,
    Inactive,
    Unenrolled,
    #[default]
    Unknown,
}

impl HostStatus {
    pub fn is_online(self) -> bool {
        matches!(self, Self::Healthy | Self::Unhealthy | Self::Updating)
    }
}

/// Revision/timestamp pair of the most recent policy response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedPolicyResponse {
    pub revision: u64,
    pub timestamp: DateTime<Utc>,
}

/// Metadata of one managed endpoint.
///
/// Immutable once fetched for a given endpoint id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostMetadata {
    pub agent: AgentInfo,
    pub host: HostInfo,
    pub policy_info: PolicyVersionInfo,
    #[serde(default)]
    pub host_status: HostStatus,
    /// Network isolation currently in effect
    #[serde(default)]
    pub isolated: bool,
    pub last_seen: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_policy_response: Option<AppliedPolicyResponse>,
}

impl HostMetadata {
    pub fn endpoint_id(&self) -> &str {
        &self.agent.id
    }

    pub fn hostname(&self) -> &str {
        &self.host.hostname
    }
}
