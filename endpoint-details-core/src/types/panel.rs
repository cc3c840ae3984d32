//! Render-time outputs of the panel controller

use serde::Serialize;
use uuid::Uuid;

use super::{ActivityLog, HostMetadata, PolicyResponseDetail, Selection, TabId};
use crate::error::FetchErrorKind;

/// Which isolation workflow is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IsolationMode {
    Isolate,
    Unisolate,
}

/// Content of one tab, gated on that tab's own data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum TabContent<'a> {
    Loading,
    Overview(&'a HostMetadata),
    ActivityLog(&'a ActivityLog),
    /// Inline empty state; never blocks the other tab
    Unavailable(FetchErrorKind),
}

/// One tab of the tabbed view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab<'a> {
    pub id: TabId,
    pub label: &'static str,
    /// Location the tab links to
    pub route: Selection,
    pub content: TabContent<'a>,
}

/// Body of the policy response panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PolicyResponseContent<'a> {
    Loading,
    /// "No policy response available"
    Unavailable {
        kind: FetchErrorKind,
        message: &'static str,
    },
    Ready {
        detail: &'a PolicyResponseDetail,
        attention_count: usize,
    },
}

/// What the user currently sees inside the panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum VisiblePanel<'a> {
    Loading,
    TabbedView {
        hostname: &'a str,
        active_tab: TabId,
        tabs: Vec<Tab<'a>>,
    },
    PolicyResponsePanel {
        endpoint_id: &'a str,
        title: &'static str,
        content: PolicyResponseContent<'a>,
    },
    IsolationPanel {
        mode: IsolationMode,
        host: &'a HostMetadata,
    },
    ErrorState {
        kind: FetchErrorKind,
    },
}

impl VisiblePanel<'_> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::ErrorState { .. })
    }
}

/// Entries of the footer action menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FooterActionKind {
    Isolate,
    Release,
    ViewPolicyResponse,
    ViewDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterAction {
    pub kind: FooterActionKind,
    pub label: &'static str,
    pub target: Selection,
}

/// Everything the rendering layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPanel<'a> {
    pub visible: VisiblePanel<'a>,
    pub show_footer: bool,
    /// Flyout header, shown outside the tabbed view
    pub header_hostname: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub footer_actions: Vec<FooterAction>,
    /// "Back to endpoint details" link target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_to_details: Option<Selection>,
}

/// One-shot dismissible error notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            body: body.into(),
        }
    }
}
