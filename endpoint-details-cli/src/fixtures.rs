//! JSON fixtures served as the endpoint data source

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use endpoint_details_core::traits::InMemoryDataSource;
use endpoint_details_core::types::{ActivityLogEntry, HostMetadata, PolicyResponseDetail};
use serde::Deserialize;

/// Fixture document; activity logs and policy responses are keyed by endpoint id
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fixtures {
    pub hosts: Vec<HostMetadata>,
    pub activity_logs: HashMap<String, Vec<ActivityLogEntry>>,
    pub policy_responses: HashMap<String, PolicyResponseDetail>,
}

impl Fixtures {
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read fixtures {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("invalid fixtures {}", path.display()))
    }

    pub async fn into_data_source(self) -> InMemoryDataSource {
        let source = InMemoryDataSource::new();
        for host in self.hosts {
            source.insert_host(host).await;
        }
        for (endpoint_id, entries) in self.activity_logs {
            source.insert_activity_log(&endpoint_id, entries).await;
        }
        for (endpoint_id, detail) in self.policy_responses {
            source.insert_policy_response(&endpoint_id, detail).await;
        }
        source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use endpoint_details_core::error::PanelError;
    use endpoint_details_core::traits::EndpointDataSource;
    use endpoint_details_core::types::ActivityLogPaging;

    const FIXTURES: &str = r#"{
        "hosts": [{
            "agent": { "id": "e1", "version": "8.2.0" },
            "host": { "hostname": "web-01", "osName": "Linux" },
            "policyInfo": { "id": "p1", "name": "Default", "revision": 2, "status": "success" },
            "hostStatus": "healthy",
            "lastSeen": "2024-05-01T12:00:00Z"
        }],
        "activityLogs": {
            "e1": [{
                "id": "a1",
                "kind": "action",
                "command": "isolate",
                "user": "elastic",
                "timestamp": "2024-05-01T11:00:00Z"
            }]
        }
    }"#;

    #[tokio::test]
    async fn serves_loaded_fixtures() {
        let source = Fixtures::from_json(FIXTURES)
            .unwrap()
            .into_data_source()
            .await;

        let host = source.fetch_host_metadata("e1").await.unwrap();
        assert_eq!(host.hostname(), "web-01");
        assert!(!host.isolated);

        let log = source
            .fetch_activity_log("e1", ActivityLogPaging::first_page(10))
            .await
            .unwrap();
        assert_eq!(log.entries.len(), 1);
        assert!(log.entries[0].success);

        assert!(matches!(
            source.fetch_policy_response("e1").await,
            Err(PanelError::EndpointNotFound(_))
        ));
    }

    #[test]
    fn empty_document_is_valid() {
        let fixtures = Fixtures::from_json("{}").unwrap();
        assert!(fixtures.hosts.is_empty());
    }
}
