//! Collaborator trait definitions

mod data_source;
mod navigation;
mod notifier;

pub use data_source::{EndpointDataSource, InMemoryDataSource};
pub use navigation::{InMemoryNavigator, NavigationEmitter};
pub use notifier::{LogNotifier, Notifier};
