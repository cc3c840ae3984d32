//! Messages consumed by the panel controller
//!
//! Every state change of the panel goes through one of these: URL changes
//! from outside, fetch completions from the runtime and user commands from
//! the rendering layer.

use crate::types::{FetchOutcome, PanelView, Selection, TabId};

#[derive(Debug, Clone, PartialEq)]
pub enum PanelMessage {
    /// The addressable location changed (back/forward, deep link, external push)
    LocationChanged(Selection),

    /// A fetch finished
    FetchCompleted(FetchOutcome),

    /// Dismiss the panel
    Close,

    /// Activate a tab of the tabbed view
    SwitchTab(TabId),

    /// Footer action: open a view of the selected endpoint
    ShowView(PanelView),

    /// "Back to endpoint details" link
    BackToDetails,

    /// Drop everything loaded for the selected endpoint and fetch again
    Retry,
}
