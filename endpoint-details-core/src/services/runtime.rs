//! Runtime driver
//!
//! Runs the fetches the controller asks for and feeds their completions
//! back. All fetches live in one `FuturesUnordered` polled by the task that
//! owns the runtime: nothing is spawned and no state is shared.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;

use crate::config::PanelConfig;
use crate::message::PanelMessage;
use crate::services::{PanelContext, PanelController};
use crate::traits::EndpointDataSource;
use crate::types::{
    ActivityLogPaging, DataKind, FetchOutcome, FetchPayload, FetchTicket, ResolvedPanel,
};

/// Panel runtime
pub struct PanelRuntime {
    controller: PanelController,
    data_source: Arc<dyn EndpointDataSource>,
    in_flight: FuturesUnordered<BoxFuture<'static, FetchOutcome>>,
}

impl PanelRuntime {
    /// Create the runtime and sync with the navigator's current location
    pub fn new(ctx: Arc<PanelContext>, config: PanelConfig) -> Self {
        let data_source = Arc::clone(&ctx.data_source);
        let mut runtime = Self {
            controller: PanelController::new(ctx, config),
            data_source,
            in_flight: FuturesUnordered::new(),
        };
        let tickets = runtime.controller.start();
        runtime.start_fetches(tickets);
        runtime
    }

    pub fn controller(&self) -> &PanelController {
        &self.controller
    }

    /// Fetches started and not yet completed
    pub fn pending_fetches(&self) -> usize {
        self.in_flight.len()
    }

    pub fn render(&self) -> Option<ResolvedPanel<'_>> {
        self.controller.render()
    }

    /// Hand one message to the controller and start the fetches it asks for
    pub fn dispatch(&mut self, msg: PanelMessage) {
        let tickets = self.controller.handle(msg);
        self.start_fetches(tickets);
    }

    /// Wait for the next fetch to finish and process it.
    ///
    /// Returns the ticket of the processed fetch, `None` when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<FetchTicket> {
        let outcome = self.in_flight.next().await?;
        let ticket = outcome.ticket.clone();
        self.dispatch(PanelMessage::FetchCompleted(outcome));
        Some(ticket)
    }

    /// Process completions until no fetch is left in flight
    pub async fn run_until_idle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    /// Interleave messages from `messages` with fetch completions until the
    /// channel closes. Fetches still in flight at that point are left pending.
    pub async fn run(&mut self, mut messages: mpsc::Receiver<PanelMessage>) {
        loop {
            tokio::select! {
                msg = messages.recv() => match msg {
                    Some(msg) => self.dispatch(msg),
                    None => break,
                },
                Some(outcome) = self.in_flight.next(), if !self.in_flight.is_empty() => {
                    self.dispatch(PanelMessage::FetchCompleted(outcome));
                }
            }
        }
        log::debug!(
            "Message channel closed with {} fetch(es) in flight",
            self.in_flight.len()
        );
    }

    fn start_fetches(&mut self, tickets: Vec<FetchTicket>) {
        let page_size = self.controller.config().activity_log_page_size;
        for ticket in tickets {
            self.in_flight
                .push(fetch(Arc::clone(&self.data_source), ticket, page_size));
        }
    }
}

fn fetch(
    source: Arc<dyn EndpointDataSource>,
    ticket: FetchTicket,
    activity_log_page_size: u32,
) -> BoxFuture<'static, FetchOutcome> {
    async move {
        let endpoint_id = ticket.endpoint_id.as_str();
        let result = match ticket.kind {
            DataKind::HostMetadata => source
                .fetch_host_metadata(endpoint_id)
                .await
                .map(FetchPayload::HostMetadata),
            DataKind::ActivityLog => source
                .fetch_activity_log(
                    endpoint_id,
                    ActivityLogPaging::first_page(activity_log_page_size),
                )
                .await
                .map(FetchPayload::ActivityLog),
            DataKind::PolicyResponse => source
                .fetch_policy_response(endpoint_id)
                .await
                .map(FetchPayload::PolicyResponse),
        };
        FetchOutcome { ticket, result }
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchErrorKind, PanelError};
    use crate::test_utils::{
        activity_entries, host, panel_context_with, policy_response, ScriptedDataSource,
    };
    use crate::types::{PanelView, TabContent, TabId, VisiblePanel};

    #[tokio::test]
    async fn loads_policy_response_panel_end_to_end() {
        let source = Arc::new(ScriptedDataSource::new());
        source.insert_host(host("e1")).await;
        source.insert_policy_response("e1", policy_response(2)).await;
        let (ctx, _, _) =
            panel_context_with("selected_endpoint=e1&show=policy_response", source.clone());

        let mut runtime = PanelRuntime::new(ctx, PanelConfig::default());
        assert_eq!(runtime.pending_fetches(), 1);
        assert!(runtime.render().unwrap().visible.is_loading());

        runtime.run_until_idle().await;
        let panel = runtime.render().unwrap();
        assert!(matches!(
            panel.visible,
            VisiblePanel::PolicyResponsePanel { .. }
        ));
        assert_eq!(source.calls(DataKind::HostMetadata), 1);
        assert_eq!(source.calls(DataKind::PolicyResponse), 1);
        assert_eq!(source.calls(DataKind::ActivityLog), 0);
    }

    #[tokio::test]
    async fn activity_log_uses_configured_page_size() {
        let source = Arc::new(ScriptedDataSource::new());
        source.insert_host(host("e1")).await;
        let (ctx, _, _) = panel_context_with("selected_endpoint=e1", source.clone());
        let config = PanelConfig {
            activity_log_page_size: 5,
            ..PanelConfig::default()
        };

        let mut runtime = PanelRuntime::new(ctx, config);
        runtime.run_until_idle().await;
        runtime.dispatch(PanelMessage::ShowView(PanelView::ActivityLog));
        runtime.run_until_idle().await;

        assert_eq!(source.last_paging().map(|p| p.page_size), Some(5));
    }

    #[tokio::test]
    async fn activity_log_failure_only_affects_its_tab() {
        let source = Arc::new(ScriptedDataSource::new());
        source.insert_host(host("e1")).await;
        source.insert_activity_log("e1", activity_entries(3)).await;
        source
            .fail(DataKind::ActivityLog, PanelError::NetworkError("timeout".into()))
            .await;
        let (ctx, _, notifier) =
            panel_context_with("selected_endpoint=e1&show=activity_log", source.clone());

        let mut runtime = PanelRuntime::new(ctx, PanelConfig::default());
        runtime.run_until_idle().await;

        let panel = runtime.render().unwrap();
        let VisiblePanel::TabbedView { tabs, .. } = panel.visible else {
            panic!("expected tabbed view");
        };
        assert_eq!(
            tabs[1].content,
            TabContent::Unavailable(FetchErrorKind::Network)
        );
        assert_eq!(tabs[0].content, TabContent::Overview(&host("e1")));
        assert_eq!(notifier.count(), 0);

        // no automatic retry
        runtime.dispatch(PanelMessage::SwitchTab(TabId::Overview));
        runtime.dispatch(PanelMessage::SwitchTab(TabId::ActivityLog));
        assert_eq!(runtime.pending_fetches(), 0);
        assert_eq!(source.calls(DataKind::ActivityLog), 1);
    }

    #[tokio::test]
    async fn run_stops_when_channel_closes() {
        let source = Arc::new(ScriptedDataSource::new());
        source.insert_host(host("e1")).await;
        let (ctx, navigator, _) = panel_context_with("selected_endpoint=e1&x=1", source);
        let mut runtime = PanelRuntime::new(ctx, PanelConfig::default());

        let (tx, rx) = mpsc::channel(8);
        tx.send(PanelMessage::SwitchTab(TabId::ActivityLog))
            .await
            .unwrap();
        tx.send(PanelMessage::Close).await.unwrap();
        drop(tx);

        runtime.run(rx).await;
        assert_eq!(runtime.render(), None);
        assert_eq!(navigator.history().last().map(String::as_str), Some("x=1"));
    }
}
