//! Controller layer

mod controller;
mod resolver;
mod runtime;
mod store;

pub use controller::PanelController;
pub use resolver::{resolve, PanelSnapshot};
pub use runtime::PanelRuntime;
pub use store::DataAvailabilityStore;

use std::sync::Arc;

use crate::traits::{EndpointDataSource, NavigationEmitter, Notifier};

/// Panel context - holds all collaborators
///
/// The embedding layer builds this and injects its own URL state, data
/// transport and toast implementations.
pub struct PanelContext {
    /// URL state
    pub navigator: Arc<dyn NavigationEmitter>,
    /// Remote data
    pub data_source: Arc<dyn EndpointDataSource>,
    /// Error toasts
    pub notifier: Arc<dyn Notifier>,
}

impl PanelContext {
    #[must_use]
    pub fn new(
        navigator: Arc<dyn NavigationEmitter>,
        data_source: Arc<dyn EndpointDataSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            navigator,
            data_source,
            notifier,
        }
    }
}
