//! Fetch lifecycle types

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ActivityLog, HostMetadata, PolicyResponseDetail};
use crate::error::{FetchErrorKind, PanelResult};

/// The three independently loading data sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    HostMetadata,
    ActivityLog,
    PolicyResponse,
}

impl DataKind {
    pub fn all() -> &'static [DataKind] {
        &[
            DataKind::HostMetadata,
            DataKind::ActivityLog,
            DataKind::PolicyResponse,
        ]
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::HostMetadata => "host_metadata",
            Self::ActivityLog => "activity_log",
            Self::PolicyResponse => "policy_response",
        })
    }
}

/// Status projection of a [`FetchSlot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Loading lifecycle of one remote data set.
///
/// A value exists only in `Success` and an error kind only in `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum FetchSlot<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(FetchErrorKind),
}

impl<T> FetchSlot<T> {
    pub fn status(&self) -> FetchStatus {
        match self {
            Self::Idle => FetchStatus::Idle,
            Self::Loading => FetchStatus::Loading,
            Self::Success(_) => FetchStatus::Success,
            Self::Error(_) => FetchStatus::Error,
        }
    }

    pub fn as_ref(&self) -> FetchSlot<&T> {
        match self {
            Self::Idle => FetchSlot::Idle,
            Self::Loading => FetchSlot::Loading,
            Self::Success(value) => FetchSlot::Success(value),
            Self::Error(kind) => FetchSlot::Error(*kind),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<FetchErrorKind> {
        match self {
            Self::Error(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Idle or Loading
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Idle | Self::Loading)
    }
}

impl<T> From<PanelResult<T>> for FetchSlot<T> {
    fn from(result: PanelResult<T>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(e) => Self::Error(e.kind()),
        }
    }
}

/// Permission to run exactly one fetch for a (kind, endpoint) pair.
///
/// Issued by the store; the completion must be handed back with the same ticket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchTicket {
    pub kind: DataKind,
    pub endpoint_id: String,
    pub request_id: u64,
}

/// Successful payload of a fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchPayload {
    HostMetadata(HostMetadata),
    ActivityLog(ActivityLog),
    PolicyResponse(PolicyResponseDetail),
}

impl FetchPayload {
    pub fn kind(&self) -> DataKind {
        match self {
            Self::HostMetadata(_) => DataKind::HostMetadata,
            Self::ActivityLog(_) => DataKind::ActivityLog,
            Self::PolicyResponse(_) => DataKind::PolicyResponse,
        }
    }
}

/// A finished fetch, ready to be committed to the store
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: PanelResult<FetchPayload>,
}

/// What the store did with a completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Written to the slot
    Committed,
    /// Superseded or evicted, dropped
    Stale,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PanelError;

    #[test]
    fn slot_from_result() {
        let ok: FetchSlot<u32> = Ok(7).into();
        assert_eq!(ok, FetchSlot::Success(7));
        assert_eq!(ok.value(), Some(&7));

        let err: FetchSlot<u32> = Err(PanelError::NetworkError("reset".into())).into();
        assert_eq!(err.status(), FetchStatus::Error);
        assert_eq!(err.error(), Some(FetchErrorKind::Network));
        assert_eq!(err.value(), None);
    }

    #[test]
    fn as_ref_keeps_status() {
        let slot: FetchSlot<String> = FetchSlot::Success("x".to_string());
        assert_eq!(slot.as_ref(), FetchSlot::Success(&"x".to_string()));
        assert!(FetchSlot::<String>::Loading.as_ref().is_pending());
    }
}
