//! Unified error type definition

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum PanelError {
    /// The selected endpoint could not be resolved by the data source
    #[error("Endpoint not found: {0}")]
    EndpointNotFound(String),

    /// Transport-level failure while fetching
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Any other failure reported by the data source
    #[error("Unknown error: {0}")]
    Unknown(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A query string or query value could not be decoded
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Configuration could not be loaded or is out of range
    #[error("Config error: {0}")]
    ConfigError(String),
}

impl PanelError {
    /// Whether it is expected behavior (endpoint gone, bad user input), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::EndpointNotFound(_) | Self::InvalidQuery(_) => true,
            Self::NetworkError(_)
            | Self::Unknown(_)
            | Self::SerializationError(_)
            | Self::ConfigError(_) => false,
        }
    }

    /// Classify into the kind stored in an error slot.
    #[must_use]
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::EndpointNotFound(_) => FetchErrorKind::NotFound,
            Self::NetworkError(_) => FetchErrorKind::Network,
            _ => FetchErrorKind::Unknown,
        }
    }
}

impl From<serde_json::Error> for PanelError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Classification of a failed fetch, as kept in a `FetchSlot::Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    /// The endpoint is no longer resolvable
    NotFound,
    /// Transient transport failure
    Network,
    /// Anything else
    Unknown,
}

impl From<&PanelError> for FetchErrorKind {
    fn from(e: &PanelError) -> Self {
        e.kind()
    }
}

/// Core layer Result type alias
pub type PanelResult<T> = std::result::Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_expected_network_is_not() {
        assert!(PanelError::EndpointNotFound("e1".to_string()).is_expected());
        assert!(!PanelError::NetworkError("reset".to_string()).is_expected());
    }

    #[test]
    fn kind_classification() {
        assert_eq!(
            PanelError::EndpointNotFound("e1".into()).kind(),
            FetchErrorKind::NotFound
        );
        assert_eq!(
            PanelError::NetworkError("x".into()).kind(),
            FetchErrorKind::Network
        );
        assert_eq!(
            PanelError::SerializationError("x".into()).kind(),
            FetchErrorKind::Unknown
        );
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_value(PanelError::EndpointNotFound("e1".into())).unwrap();
        assert_eq!(json["code"], "EndpointNotFound");
        assert_eq!(json["details"], "e1");
    }
}
