//! URL query state and the selection decoded from it

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PanelError;

/// Query key holding the requested view
pub const SHOW_PARAM: &str = "show";
/// Query key holding the selected endpoint id
pub const SELECTED_ENDPOINT_PARAM: &str = "selected_endpoint";

/// Decoded URL query parameters (keys sorted, later duplicates win)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` query, with or without the leading `?`
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self(
            url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        )
    }

    /// Encode back into a query string (no leading `?`)
    #[must_use]
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// The mutually exclusive views of the details panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelView {
    /// Host overview tab (`show=details`)
    #[default]
    Overview,
    /// Activity log tab
    ActivityLog,
    /// Policy response panel
    PolicyResponse,
    /// Isolate host workflow
    Isolate,
    /// Release host workflow
    Unisolate,
}

impl PanelView {
    /// Canonical `show` query value
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Overview => "details",
            Self::ActivityLog => "activity_log",
            Self::PolicyResponse => "policy_response",
            Self::Isolate => "isolate",
            Self::Unisolate => "unisolate",
        }
    }

    /// Decode a `show` query value; `overview` is accepted as an alias of `details`
    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "details" | "overview" => Some(Self::Overview),
            "activity_log" => Some(Self::ActivityLog),
            "policy_response" => Some(Self::PolicyResponse),
            "isolate" => Some(Self::Isolate),
            "unisolate" => Some(Self::Unisolate),
            _ => None,
        }
    }

    /// Views that keep the footer action menu visible
    pub fn is_browsable(self) -> bool {
        matches!(
            self,
            Self::Overview | Self::ActivityLog | Self::PolicyResponse
        )
    }

    /// Tab backing this view, if it is one of the tabbed views
    pub fn tab(self) -> Option<TabId> {
        match self {
            Self::Overview => Some(TabId::Overview),
            Self::ActivityLog => Some(TabId::ActivityLog),
            _ => None,
        }
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

impl FromStr for PanelView {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_query_value(s)
            .ok_or_else(|| PanelError::InvalidQuery(format!("unknown view '{s}'")))
    }
}

/// Tabs of the tabbed view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabId {
    Overview,
    ActivityLog,
}

impl TabId {
    /// Tabs in display order
    pub fn all() -> &'static [TabId] {
        &[TabId::Overview, TabId::ActivityLog]
    }

    pub fn view(self) -> PanelView {
        match self {
            Self::Overview => PanelView::Overview,
            Self::ActivityLog => PanelView::ActivityLog,
        }
    }
}

impl FromStr for TabId {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanelView::from_query_value(s)
            .and_then(PanelView::tab)
            .ok_or_else(|| PanelError::InvalidQuery(format!("unknown tab '{s}'")))
    }
}

/// Structured decoding of the current URL state.
///
/// Replaced wholesale on navigation; the controller never edits one in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// `selected_endpoint`, `None` when absent or empty
    pub selected_endpoint: Option<String>,
    /// `show` as present in the URL; unknown values decode to `None`
    pub show: Option<PanelView>,
    /// Every other parameter, untouched
    pub extra: QueryParams,
}

impl Selection {
    /// Selection for `endpoint_id` showing `view`, with no other parameters
    #[must_use]
    pub fn for_endpoint(endpoint_id: impl Into<String>, view: PanelView) -> Self {
        Self {
            selected_endpoint: Some(endpoint_id.into()),
            show: Some(view),
            extra: QueryParams::new(),
        }
    }

    #[must_use]
    pub fn from_params(mut params: QueryParams) -> Self {
        let selected_endpoint = params
            .remove(SELECTED_ENDPOINT_PARAM)
            .filter(|id| !id.is_empty());
        let show = params
            .remove(SHOW_PARAM)
            .and_then(|v| PanelView::from_query_value(&v));
        Self {
            selected_endpoint,
            show,
            extra: params,
        }
    }

    #[must_use]
    pub fn from_query(query: &str) -> Self {
        Self::from_params(QueryParams::parse(query))
    }

    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut params = self.extra.clone();
        if let Some(id) = &self.selected_endpoint {
            params.insert(SELECTED_ENDPOINT_PARAM, id.clone());
        }
        if let Some(view) = self.show {
            params.insert(SHOW_PARAM, view.as_query_value());
        }
        params
    }

    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.to_params().to_query_string()
    }

    /// The view to render; a missing `show` means the overview
    pub fn requested_view(&self) -> PanelView {
        self.show.unwrap_or_default()
    }

    pub fn endpoint_id(&self) -> Option<&str> {
        self.selected_endpoint.as_deref()
    }

    /// Same location with `show` replaced
    #[must_use]
    pub fn with_view(&self, view: PanelView) -> Self {
        Self {
            show: Some(view),
            ..self.clone()
        }
    }

    /// Location after dismissing the panel: the current parameters minus
    /// `show` and `selected_endpoint`, everything else preserved.
    #[must_use]
    pub fn without_panel(&self) -> Self {
        let mut params = self.to_params();
        params.remove(SHOW_PARAM);
        params.remove(SELECTED_ENDPOINT_PARAM);
        Self::from_params(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selection_and_keeps_other_params() {
        let sel = Selection::from_query("?selected_endpoint=e1&show=activity_log&page_index=2");
        assert_eq!(sel.endpoint_id(), Some("e1"));
        assert_eq!(sel.requested_view(), PanelView::ActivityLog);
        assert_eq!(sel.extra.get("page_index"), Some("2"));
        assert!(!sel.extra.contains_key(SHOW_PARAM));
    }

    #[test]
    fn missing_or_unknown_show_defaults_to_overview() {
        assert_eq!(
            Selection::from_query("selected_endpoint=e1").requested_view(),
            PanelView::Overview
        );
        let sel = Selection::from_query("selected_endpoint=e1&show=bogus");
        assert_eq!(sel.show, None);
        assert_eq!(sel.requested_view(), PanelView::Overview);
    }

    #[test]
    fn overview_alias_encodes_as_details() {
        let sel = Selection::from_query("selected_endpoint=e1&show=overview");
        assert_eq!(sel.show, Some(PanelView::Overview));
        assert_eq!(sel.to_query_string(), "selected_endpoint=e1&show=details");
    }

    #[test]
    fn empty_endpoint_is_no_selection() {
        assert_eq!(
            Selection::from_query("selected_endpoint=&show=details").selected_endpoint,
            None
        );
    }

    #[test]
    fn without_panel_removes_exactly_show_and_endpoint() {
        let sel = Selection::from_query("selected_endpoint=e1&show=policy_response&foo=bar");
        let closed = sel.without_panel();
        let expected: QueryParams = [("foo", "bar")].into_iter().collect();
        assert_eq!(closed.to_params(), expected);
        assert_eq!(closed.to_query_string(), "foo=bar");
    }

    #[test]
    fn with_view_preserves_everything_else() {
        let sel = Selection::from_query("selected_endpoint=e1&show=details&kql=host.os%3Awindows");
        let switched = sel.with_view(PanelView::ActivityLog);
        assert_eq!(switched.endpoint_id(), Some("e1"));
        assert_eq!(switched.extra.get("kql"), Some("host.os:windows"));
        assert_eq!(switched.requested_view(), PanelView::ActivityLog);
    }

    #[test]
    fn encoded_values_round_trip() {
        let sel = Selection::from_query("selected_endpoint=a%20b&q=x%26y");
        assert_eq!(sel.endpoint_id(), Some("a b"));
        assert_eq!(Selection::from_query(&sel.to_query_string()), sel);
    }

    #[test]
    fn tab_ids_parse_from_view_values() {
        assert_eq!("details".parse::<TabId>().unwrap(), TabId::Overview);
        assert_eq!("activity_log".parse::<TabId>().unwrap(), TabId::ActivityLog);
        assert!("policy_response".parse::<TabId>().is_err());
    }

    #[test]
    fn browsable_views() {
        assert!(PanelView::Overview.is_browsable());
        assert!(PanelView::ActivityLog.is_browsable());
        assert!(PanelView::PolicyResponse.is_browsable());
        assert!(!PanelView::Isolate.is_browsable());
        assert!(!PanelView::Unisolate.is_browsable());
    }
}
