//! Remote data source abstraction Trait

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{PanelError, PanelResult};
use crate::types::{
    ActivityLog, ActivityLogEntry, ActivityLogPaging, HostMetadata, PolicyResponseDetail,
};

/// Endpoint data source Trait
///
/// Transport, timeouts and retries belong to the implementation; the
/// controller only sees the classified result.
#[async_trait]
pub trait EndpointDataSource: Send + Sync {
    /// Fetch host metadata
    ///
    /// # Returns
    /// * `Err(PanelError::EndpointNotFound)` - the endpoint is no longer known
    async fn fetch_host_metadata(&self, endpoint_id: &str) -> PanelResult<HostMetadata>;

    /// Fetch one page of the activity log
    async fn fetch_activity_log(
        &self,
        endpoint_id: &str,
        paging: ActivityLogPaging,
    ) -> PanelResult<ActivityLog>;

    /// Fetch the latest policy response
    async fn fetch_policy_response(&self, endpoint_id: &str) -> PanelResult<PolicyResponseDetail>;
}

/// In-memory data source
///
/// Default implementation, backed by maps keyed by endpoint id.
#[derive(Clone, Default)]
pub struct InMemoryDataSource {
    hosts: Arc<RwLock<HashMap<String, HostMetadata>>>,
    activity_logs: Arc<RwLock<HashMap<String, Vec<ActivityLogEntry>>>>,
    policy_responses: Arc<RwLock<HashMap<String, PolicyResponseDetail>>>,
}

impl InMemoryDataSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_host(&self, host: HostMetadata) {
        self.hosts
            .write()
            .await
            .insert(host.endpoint_id().to_string(), host);
    }

    pub async fn insert_activity_log(&self, endpoint_id: &str, entries: Vec<ActivityLogEntry>) {
        self.activity_logs
            .write()
            .await
            .insert(endpoint_id.to_string(), entries);
    }

    pub async fn insert_policy_response(&self, endpoint_id: &str, detail: PolicyResponseDetail) {
        self.policy_responses
            .write()
            .await
            .insert(endpoint_id.to_string(), detail);
    }

    pub async fn remove_host(&self, endpoint_id: &str) {
        self.hosts.write().await.remove(endpoint_id);
    }
}

#[async_trait]
impl EndpointDataSource for InMemoryDataSource {
    async fn fetch_host_metadata(&self, endpoint_id: &str) -> PanelResult<HostMetadata> {
        self.hosts
            .read()
            .await
            .get(endpoint_id)
            .cloned()
            .ok_or_else(|| PanelError::EndpointNotFound(endpoint_id.to_string()))
    }

    async fn fetch_activity_log(
        &self,
        endpoint_id: &str,
        paging: ActivityLogPaging,
    ) -> PanelResult<ActivityLog> {
        // pages are 1-based
        let page_size = paging.page_size as usize;
        let skip = (paging.page.saturating_sub(1) as usize).saturating_mul(page_size);
        let entries = self
            .activity_logs
            .read()
            .await
            .get(endpoint_id)
            .map(|all| all.iter().skip(skip).take(page_size).cloned().collect())
            .unwrap_or_default();
        Ok(ActivityLog { paging, entries })
    }

    async fn fetch_policy_response(&self, endpoint_id: &str) -> PanelResult<PolicyResponseDetail> {
        self.policy_responses
            .read()
            .await
            .get(endpoint_id)
            .cloned()
            .ok_or_else(|| PanelError::EndpointNotFound(endpoint_id.to_string()))
    }
}
