//! Type definitions

mod activity_log;
mod fetch;
mod host;
mod panel;
mod policy_response;
mod selection;

pub use activity_log::{ActivityKind, ActivityLog, ActivityLogEntry, ActivityLogPaging};
pub use fetch::{
    CompletionOutcome, DataKind, FetchOutcome, FetchPayload, FetchSlot, FetchStatus, FetchTicket,
};
pub use host::{
    AgentInfo, AppliedPolicyResponse, HostInfo, HostMetadata, HostStatus, PolicyApplyStatus,
    PolicyVersionInfo,
};
pub use panel::{
    FooterAction, FooterActionKind, IsolationMode, Notification, PolicyResponseContent,
    ResolvedPanel, Tab, TabContent, VisiblePanel,
};
pub use policy_response::{
    PolicyConfiguration, PolicyResponseAction, PolicyResponseDetail, PolicyResponseStatus,
};
pub use selection::{
    PanelView, QueryParams, Selection, TabId, SELECTED_ENDPOINT_PARAM, SHOW_PARAM,
};
