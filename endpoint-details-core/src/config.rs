//! Controller configuration

use serde::{Deserialize, Serialize};

use crate::error::{PanelError, PanelResult};
use crate::i18n::Language;

fn default_activity_log_page_size() -> u32 {
    50
}

fn default_max_cached_endpoints() -> usize {
    16
}

/// Tunables of the panel controller. Every field has a default, so an
/// empty document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct PanelConfig {
    /// Language of labels and notifications
    pub language: Language,

    /// Page size requested for the activity log tab
    #[serde(default = "default_activity_log_page_size")]
    pub activity_log_page_size: u32,

    /// Endpoints whose slots stay cached for back-navigation
    #[serde(default = "default_max_cached_endpoints")]
    pub max_cached_endpoints: usize,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            activity_log_page_size: default_activity_log_page_size(),
            max_cached_endpoints: default_max_cached_endpoints(),
        }
    }
}

impl PanelConfig {
    /// Reject values the controller cannot run with
    pub fn validate(&self) -> PanelResult<()> {
        if self.activity_log_page_size == 0 {
            return Err(PanelError::ConfigError(
                "activity_log_page_size must be at least 1".to_string(),
            ));
        }
        if self.max_cached_endpoints == 0 {
            return Err(PanelError::ConfigError(
                "max_cached_endpoints must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
