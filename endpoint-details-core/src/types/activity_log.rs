//! Activity log types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether the entry is the issued action or the endpoint's response to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Action,
    Response,
}

/// One response-action record tied to the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub id: String,
    pub kind: ActivityKind,
    /// `isolate`, `unisolate`, ...
    pub command: String,
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default = "default_success")]
    pub success: bool,
}

fn default_success() -> bool {
    true
}

/// Paging of the activity log request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogPaging {
    pub page: u32,
    pub page_size: u32,
}

impl ActivityLogPaging {
    pub fn first_page(page_size: u32) -> Self {
        Self { page: 1, page_size }
    }
}

/// Activity log of one endpoint, in the order the data source delivered it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub paging: ActivityLogPaging,
    #[serde(default)]
    pub entries: Vec<ActivityLogEntry>,
}

impl ActivityLog {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.success).count()
    }
}
