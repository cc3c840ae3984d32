//! Test helpers
//!
//! Fixtures, a counting data source and a recording notifier.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::RwLock;

use crate::error::{PanelError, PanelResult};
use crate::services::PanelContext;
use crate::traits::{EndpointDataSource, InMemoryDataSource, InMemoryNavigator, Notifier};
use crate::types::{
    ActivityKind, ActivityLog, ActivityLogEntry, ActivityLogPaging, AgentInfo, DataKind,
    HostInfo, HostMetadata, HostStatus, Notification, PolicyApplyStatus, PolicyConfiguration,
    PolicyResponseAction, PolicyResponseDetail, PolicyResponseStatus, PolicyVersionInfo,
};

// ===== Fixtures =====

/// Host `endpoint_id` named `host-<endpoint_id>`, not isolated
pub fn host(endpoint_id: &str) -> HostMetadata {
    HostMetadata {
        agent: AgentInfo {
            id: endpoint_id.to_string(),
            version: "8.2.0".to_string(),
        },
        host: HostInfo {
            hostname: format!("host-{endpoint_id}"),
            os_name: "Windows".to_string(),
            ip: vec!["10.0.0.1".to_string()],
        },
        policy_info: PolicyVersionInfo {
            id: "policy-1".to_string(),
            name: "Default".to_string(),
            revision: 1,
            status: PolicyApplyStatus::Success,
        },
        host_status: HostStatus::Healthy,
        isolated: false,
        last_seen: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        applied_policy_response: None,
    }
}

pub fn activity_entries(count: usize) -> Vec<ActivityLogEntry> {
    (0..count)
        .map(|i| ActivityLogEntry {
            id: format!("action-{i}"),
            kind: ActivityKind::Action,
            command: "isolate".to_string(),
            user: "elastic".to_string(),
            comment: None,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            success: true,
        })
        .collect()
}

pub fn activity_log(count: usize) -> ActivityLog {
    ActivityLog {
        paging: ActivityLogPaging::first_page(50),
        entries: activity_entries(count),
    }
}

/// Policy response with one failed action out of two
pub fn policy_response(revision: u64) -> PolicyResponseDetail {
    PolicyResponseDetail {
        actions: vec![
            PolicyResponseAction {
                name: "load_config".to_string(),
                message: String::new(),
                status: PolicyResponseStatus::Success,
            },
            PolicyResponseAction {
                name: "download_model".to_string(),
                message: "Failed to download model".to_string(),
                status: PolicyResponseStatus::Failure,
            },
        ],
        configurations: vec![PolicyConfiguration {
            name: "malware".to_string(),
            status: PolicyResponseStatus::Failure,
            concerned_actions: vec!["load_config".to_string(), "download_model".to_string()],
        }],
        applied_revision: revision,
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

// ===== RecordingNotifier =====

#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_error(&self, notification: &Notification) {
        self.notifications.lock().unwrap().push(notification.clone());
    }
}

// ===== ScriptedDataSource =====

/// In-memory data source that counts calls and can be told to fail
#[derive(Default)]
pub struct ScriptedDataSource {
    inner: InMemoryDataSource,
    calls: Mutex<HashMap<DataKind, usize>>,
    last_paging: Mutex<Option<ActivityLogPaging>>,
    /// If set, every fetch of that kind returns this error
    failures: RwLock<HashMap<DataKind, PanelError>>,
}

impl ScriptedDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_host(&self, host: HostMetadata) {
        self.inner.insert_host(host).await;
    }

    pub async fn insert_policy_response(&self, endpoint_id: &str, detail: PolicyResponseDetail) {
        self.inner.insert_policy_response(endpoint_id, detail).await;
    }

    pub async fn insert_activity_log(&self, endpoint_id: &str, entries: Vec<ActivityLogEntry>) {
        self.inner.insert_activity_log(endpoint_id, entries).await;
    }

    pub async fn fail(&self, kind: DataKind, error: PanelError) {
        self.failures.write().await.insert(kind, error);
    }

    pub fn calls(&self, kind: DataKind) -> usize {
        self.calls.lock().unwrap().get(&kind).copied().unwrap_or(0)
    }

    pub fn last_paging(&self) -> Option<ActivityLogPaging> {
        *self.last_paging.lock().unwrap()
    }

    async fn record(&self, kind: DataKind) -> PanelResult<()> {
        *self.calls.lock().unwrap().entry(kind).or_insert(0) += 1;
        match self.failures.read().await.get(&kind) {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EndpointDataSource for ScriptedDataSource {
    async fn fetch_host_metadata(&self, endpoint_id: &str) -> PanelResult<HostMetadata> {
        self.record(DataKind::HostMetadata).await?;
        self.inner.fetch_host_metadata(endpoint_id).await
    }

    async fn fetch_activity_log(
        &self,
        endpoint_id: &str,
        paging: ActivityLogPaging,
    ) -> PanelResult<ActivityLog> {
        *self.last_paging.lock().unwrap() = Some(paging);
        self.record(DataKind::ActivityLog).await?;
        self.inner.fetch_activity_log(endpoint_id, paging).await
    }

    async fn fetch_policy_response(&self, endpoint_id: &str) -> PanelResult<PolicyResponseDetail> {
        self.record(DataKind::PolicyResponse).await?;
        self.inner.fetch_policy_response(endpoint_id).await
    }
}

// ===== Context =====

/// Context positioned at `query`, backed by an empty in-memory data source
pub fn panel_context(
    query: &str,
) -> (
    Arc<PanelContext>,
    Arc<InMemoryNavigator>,
    Arc<RecordingNotifier>,
) {
    panel_context_with(query, Arc::new(InMemoryDataSource::new()))
}

pub fn panel_context_with(
    query: &str,
    data_source: Arc<dyn EndpointDataSource>,
) -> (
    Arc<PanelContext>,
    Arc<InMemoryNavigator>,
    Arc<RecordingNotifier>,
) {
    let navigator = Arc::new(InMemoryNavigator::new(query));
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = Arc::new(PanelContext::new(
        navigator.clone(),
        data_source,
        notifier.clone(),
    ));
    (ctx, navigator, notifier)
}
