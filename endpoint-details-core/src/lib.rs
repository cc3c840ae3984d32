//! Endpoint Details Core Library
//!
//! View-state synchronization for the endpoint details flyout:
//! - URL query state decoding and encoding (`Selection`)
//! - Data availability store for the three remote data sets
//! - Pure view resolution from selection and load state
//! - Panel controller and its async runtime driver
//!
//! Platform-independent: URL state, data transport and notifications are
//! injected through traits.

pub mod config;
pub mod error;
pub mod i18n;
pub mod message;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::PanelConfig;
pub use error::{FetchErrorKind, PanelError, PanelResult};
pub use message::PanelMessage;
pub use services::{
    resolve, DataAvailabilityStore, PanelContext, PanelController, PanelRuntime, PanelSnapshot,
};
pub use traits::{EndpointDataSource, NavigationEmitter, Notifier};
