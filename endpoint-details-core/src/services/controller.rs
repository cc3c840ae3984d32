//! Panel controller
//!
//! Owns the current selection and the data availability store. Location
//! changes and commands return the fetch tickets the runtime must start.

use std::sync::Arc;

use crate::config::PanelConfig;
use crate::i18n::Translations;
use crate::message::PanelMessage;
use crate::services::resolver::resolve;
use crate::services::{DataAvailabilityStore, PanelContext};
use crate::types::{
    CompletionOutcome, DataKind, FetchOutcome, FetchSlot, FetchStatus, FetchTicket, Notification,
    PanelView, ResolvedPanel, Selection, TabId,
};

/// Identity of an already notified host metadata failure
#[derive(Debug, Clone, PartialEq, Eq)]
struct NotificationKey {
    endpoint_id: String,
    view: PanelView,
    request_id: u64,
}

/// Panel controller
pub struct PanelController {
    ctx: Arc<PanelContext>,
    config: PanelConfig,
    texts: &'static Translations,
    store: DataAvailabilityStore,
    selection: Selection,
    last_notified: Option<NotificationKey>,
}

impl PanelController {
    /// Create a controller with nothing selected.
    ///
    /// Call [`start`](Self::start) to pick up the navigator's current location.
    #[must_use]
    pub fn new(ctx: Arc<PanelContext>, config: PanelConfig) -> Self {
        Self {
            ctx,
            texts: config.language.translations(),
            store: DataAvailabilityStore::new(config.max_cached_endpoints),
            config,
            selection: Selection::default(),
            last_notified: None,
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn store(&self) -> &DataAvailabilityStore {
        &self.store
    }

    /// Sync with the location the navigator currently holds
    pub fn start(&mut self) -> Vec<FetchTicket> {
        let selection = self.ctx.navigator.current_selection();
        self.on_location_change(selection)
    }

    /// Single entry point for every message
    pub fn handle(&mut self, msg: PanelMessage) -> Vec<FetchTicket> {
        match msg {
            PanelMessage::LocationChanged(selection) => self.on_location_change(selection),
            PanelMessage::FetchCompleted(outcome) => self.on_fetch_completed(outcome),
            PanelMessage::Close => self.close(),
            PanelMessage::SwitchTab(tab) => self.switch_tab(tab),
            PanelMessage::ShowView(view) => self.show_view(view),
            PanelMessage::BackToDetails => self.back_to_details(),
            PanelMessage::Retry => self.retry(),
        }
    }

    /// Adopt a new selection and request whatever it is missing
    pub fn on_location_change(&mut self, selection: Selection) -> Vec<FetchTicket> {
        match selection.endpoint_id() {
            Some(endpoint_id) => self.store.select_endpoint(endpoint_id),
            None => self.store.clear_selection(),
        }
        self.selection = selection;
        let tickets = self.sync();
        self.notify_host_error();
        tickets
    }

    /// Request the data the current selection needs.
    ///
    /// Host metadata first; the activity log and the policy response only
    /// once host metadata loaded and only when their view is requested.
    pub fn sync(&mut self) -> Vec<FetchTicket> {
        let Some(endpoint_id) = self.selection.endpoint_id() else {
            return Vec::new();
        };

        let mut tickets = Vec::new();
        tickets.extend(self.store.request_fetch(DataKind::HostMetadata, endpoint_id));
        if self.store.status(DataKind::HostMetadata, endpoint_id) != FetchStatus::Success {
            return tickets;
        }

        let lazy = match self.selection.requested_view() {
            PanelView::ActivityLog => Some(DataKind::ActivityLog),
            PanelView::PolicyResponse => Some(DataKind::PolicyResponse),
            PanelView::Overview | PanelView::Isolate | PanelView::Unisolate => None,
        };
        if let Some(kind) = lazy {
            tickets.extend(self.store.request_fetch(kind, endpoint_id));
        }
        tickets
    }

    /// Commit a finished fetch and follow up on it
    pub fn on_fetch_completed(&mut self, outcome: FetchOutcome) -> Vec<FetchTicket> {
        let ticket = outcome.ticket.clone();
        let failure = outcome.result.as_ref().err().cloned();

        if self.store.complete(outcome) == CompletionOutcome::Stale {
            return Vec::new();
        }

        if let Some(e) = failure {
            if e.is_expected() {
                log::warn!(
                    "{} fetch for {} failed: {e}",
                    ticket.kind,
                    ticket.endpoint_id
                );
            } else {
                log::error!(
                    "{} fetch for {} failed: {e}",
                    ticket.kind,
                    ticket.endpoint_id
                );
            }
        }

        // completions for other endpoints stay cached but change nothing on screen
        if self.selection.endpoint_id() != Some(ticket.endpoint_id.as_str()) {
            return Vec::new();
        }
        let tickets = self.sync();
        self.notify_host_error();
        tickets
    }

    /// What the panel shows for the current selection and slot states
    pub fn render(&self) -> Option<ResolvedPanel<'_>> {
        let endpoint_id = self.selection.endpoint_id()?;
        resolve(&self.selection, self.store.snapshot(endpoint_id), self.texts)
    }

    /// Dismiss the panel, keeping every unrelated query parameter
    pub fn close(&mut self) -> Vec<FetchTicket> {
        let target = self.selection.without_panel();
        log::info!("Close details panel");
        self.navigate(&target)
    }

    pub fn switch_tab(&mut self, tab: TabId) -> Vec<FetchTicket> {
        self.show_view(tab.view())
    }

    /// Open `view` for the selected endpoint
    pub fn show_view(&mut self, view: PanelView) -> Vec<FetchTicket> {
        let Some(endpoint_id) = self.selection.endpoint_id() else {
            log::debug!("Ignore navigation to {view}: no endpoint selected");
            return Vec::new();
        };
        log::info!("Show {view} for {endpoint_id}");
        let target = self.selection.with_view(view);
        self.navigate(&target)
    }

    pub fn back_to_details(&mut self) -> Vec<FetchTicket> {
        self.show_view(PanelView::Overview)
    }

    /// User-initiated refetch of the selected endpoint
    pub fn retry(&mut self) -> Vec<FetchTicket> {
        let Some(endpoint_id) = self.selection.endpoint_id() else {
            return Vec::new();
        };
        log::info!("Retry loading {endpoint_id}");
        self.store.invalidate(endpoint_id);
        self.sync()
    }

    fn navigate(&mut self, target: &Selection) -> Vec<FetchTicket> {
        self.ctx.navigator.push_view(target);
        let selection = self.ctx.navigator.current_selection();
        self.on_location_change(selection)
    }

    /// One notification per (endpoint, view, failed request)
    fn notify_host_error(&mut self) {
        let Some(endpoint_id) = self.selection.endpoint_id() else {
            return;
        };
        if !matches!(self.store.host_metadata(endpoint_id), FetchSlot::Error(_)) {
            return;
        }
        let Some(request_id) = self
            .store
            .settled_request(DataKind::HostMetadata, endpoint_id)
        else {
            return;
        };

        let key = NotificationKey {
            endpoint_id: endpoint_id.to_string(),
            view: self.selection.requested_view(),
            request_id,
        };
        if self.last_notified.as_ref() == Some(&key) {
            return;
        }

        let notification = Notification::new(
            self.texts.notifications.host_not_found_title,
            self.texts.notifications.host_not_found_body,
        );
        self.ctx.notifier.notify_error(&notification);
        self.last_notified = Some(key);
    }
}
