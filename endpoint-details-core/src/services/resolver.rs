//! View resolver
//!
//! Pure mapping from (selection, slot states) to what the panel shows.
//! Nothing here remembers the previous frame: the same inputs always
//! resolve to the same panel.

use crate::i18n::Translations;
use crate::types::{
    ActivityLog, FetchSlot, FooterAction, FooterActionKind, HostMetadata, IsolationMode, PanelView,
    PolicyResponseContent, PolicyResponseDetail, ResolvedPanel, Selection, Tab, TabContent, TabId,
    VisiblePanel,
};

/// Read-only projection of the slots of the selected endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSnapshot<'a> {
    pub host_metadata: FetchSlot<&'a HostMetadata>,
    pub activity_log: FetchSlot<&'a ActivityLog>,
    pub policy_response: FetchSlot<&'a PolicyResponseDetail>,
}

impl PanelSnapshot<'_> {
    /// Snapshot with every slot idle
    pub fn idle() -> Self {
        Self {
            host_metadata: FetchSlot::Idle,
            activity_log: FetchSlot::Idle,
            policy_response: FetchSlot::Idle,
        }
    }
}

/// Resolve the panel for `selection`.
///
/// Returns `None` when no endpoint is selected (the panel is not shown).
pub fn resolve<'a>(
    selection: &Selection,
    snapshot: PanelSnapshot<'a>,
    texts: &'static Translations,
) -> Option<ResolvedPanel<'a>> {
    selection.endpoint_id()?;

    let host = match snapshot.host_metadata {
        FetchSlot::Idle | FetchSlot::Loading => return Some(bare(VisiblePanel::Loading)),
        FetchSlot::Error(kind) => return Some(bare(VisiblePanel::ErrorState { kind })),
        FetchSlot::Success(host) => host,
    };

    let view = selection.requested_view();
    let visible = match view {
        PanelView::Overview => tabbed(selection, host, TabId::Overview, snapshot, texts),
        PanelView::ActivityLog => tabbed(selection, host, TabId::ActivityLog, snapshot, texts),
        PanelView::PolicyResponse => VisiblePanel::PolicyResponsePanel {
            endpoint_id: host.endpoint_id(),
            title: texts.policy_response.title,
            content: policy_response_content(snapshot.policy_response, texts),
        },
        PanelView::Isolate => VisiblePanel::IsolationPanel {
            mode: IsolationMode::Isolate,
            host,
        },
        PanelView::Unisolate => VisiblePanel::IsolationPanel {
            mode: IsolationMode::Unisolate,
            host,
        },
    };

    let show_footer = view.is_browsable();
    let header_hostname = matches!(
        view,
        PanelView::PolicyResponse | PanelView::Isolate | PanelView::Unisolate
    )
    .then(|| host.hostname());
    let footer_actions = if show_footer {
        footer_actions(selection, host, view, texts)
    } else {
        Vec::new()
    };
    let back_to_details =
        (view == PanelView::PolicyResponse).then(|| selection.with_view(PanelView::Overview));

    Some(ResolvedPanel {
        visible,
        show_footer,
        header_hostname,
        footer_actions,
        back_to_details,
    })
}

/// Panel without footer, header or links (loading and error states)
fn bare(visible: VisiblePanel<'_>) -> ResolvedPanel<'_> {
    ResolvedPanel {
        visible,
        show_footer: false,
        header_hostname: None,
        footer_actions: Vec::new(),
        back_to_details: None,
    }
}

fn tabbed<'a>(
    selection: &Selection,
    host: &'a HostMetadata,
    active_tab: TabId,
    snapshot: PanelSnapshot<'a>,
    texts: &'static Translations,
) -> VisiblePanel<'a> {
    let tabs = TabId::all()
        .iter()
        .map(|&id| {
            let (label, content) = match id {
                TabId::Overview => (texts.tabs.overview, TabContent::Overview(host)),
                TabId::ActivityLog => (
                    texts.tabs.activity_log,
                    match snapshot.activity_log {
                        FetchSlot::Success(log) => TabContent::ActivityLog(log),
                        FetchSlot::Error(kind) => TabContent::Unavailable(kind),
                        FetchSlot::Idle | FetchSlot::Loading => TabContent::Loading,
                    },
                ),
            };
            Tab {
                id,
                label,
                route: selection.with_view(id.view()),
                content,
            }
        })
        .collect();

    VisiblePanel::TabbedView {
        hostname: host.hostname(),
        active_tab,
        tabs,
    }
}

fn policy_response_content<'a>(
    slot: FetchSlot<&'a PolicyResponseDetail>,
    texts: &'static Translations,
) -> PolicyResponseContent<'a> {
    match slot {
        FetchSlot::Idle | FetchSlot::Loading => PolicyResponseContent::Loading,
        FetchSlot::Error(kind) => PolicyResponseContent::Unavailable {
            kind,
            message: texts.policy_response.no_policy_response,
        },
        FetchSlot::Success(detail) => PolicyResponseContent::Ready {
            detail,
            attention_count: detail.failed_or_warning_action_count(),
        },
    }
}

fn footer_actions(
    selection: &Selection,
    host: &HostMetadata,
    view: PanelView,
    texts: &'static Translations,
) -> Vec<FooterAction> {
    let mut actions = Vec::with_capacity(2);
    if view == PanelView::PolicyResponse {
        actions.push(FooterAction {
            kind: FooterActionKind::ViewDetails,
            label: texts.footer.view_details,
            target: selection.with_view(PanelView::Overview),
        });
    } else {
        actions.push(FooterAction {
            kind: FooterActionKind::ViewPolicyResponse,
            label: texts.footer.view_policy_response,
            target: selection.with_view(PanelView::PolicyResponse),
        });
    }
    actions.push(if host.isolated {
        FooterAction {
            kind: FooterActionKind::Release,
            label: texts.footer.release,
            target: selection.with_view(PanelView::Unisolate),
        }
    } else {
        FooterAction {
            kind: FooterActionKind::Isolate,
            label: texts.footer.isolate,
            target: selection.with_view(PanelView::Isolate),
        }
    });
    actions
}
