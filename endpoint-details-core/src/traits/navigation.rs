//! Navigation emitter abstraction Trait

use std::sync::{PoisonError, RwLock};

use crate::types::Selection;

/// URL-state collaborator
///
/// `push_view` replaces the addressable location; the new location is read
/// back through `current_selection`.
pub trait NavigationEmitter: Send + Sync {
    /// Replace the current location
    fn push_view(&self, selection: &Selection);

    /// Decode the current location
    fn current_selection(&self) -> Selection;
}

/// In-memory navigator that keeps the pushed locations as query strings
#[derive(Debug, Default)]
pub struct InMemoryNavigator {
    history: RwLock<Vec<String>>,
}

impl InMemoryNavigator {
    /// Create a navigator positioned at `query`
    #[must_use]
    pub fn new(query: &str) -> Self {
        Self {
            history: RwLock::new(vec![query.trim_start_matches('?').to_string()]),
        }
    }

    /// Every location visited so far, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NavigationEmitter for InMemoryNavigator {
    fn push_view(&self, selection: &Selection) {
        self.history
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(selection.to_query_string());
    }

    fn current_selection(&self) -> Selection {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .map(|query| Selection::from_query(query))
            .unwrap_or_default()
    }
}
