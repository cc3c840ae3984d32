//! Translation key definitions
//!
//! Every localized string the controller hands to the rendering layer lives
//! here, grouped by the part of the panel it appears in.

/// Root structure of all translated texts
pub struct Translations {
    /// Shared vocabulary
    pub common: CommonTexts,
    /// Tab labels of the tabbed view
    pub tabs: TabTexts,
    /// Policy response panel
    pub policy_response: PolicyResponseTexts,
    /// Footer action menu
    pub footer: FooterTexts,
    /// Toast notifications
    pub notifications: NotificationTexts,
}

// ============================================================================
// Common
// ============================================================================

pub struct CommonTexts {
    pub loading: &'static str,
    pub close: &'static str,
}

// ============================================================================
// Panel texts
// ============================================================================

pub struct TabTexts {
    pub overview: &'static str,
    pub activity_log: &'static str,
}

pub struct PolicyResponseTexts {
    pub title: &'static str,
    pub no_policy_response: &'static str,
    pub back_to_details: &'static str,
}

pub struct FooterTexts {
    pub isolate: &'static str,
    pub release: &'static str,
    pub view_policy_response: &'static str,
    pub view_details: &'static str,
}

pub struct NotificationTexts {
    pub host_not_found_title: &'static str,
    pub host_not_found_body: &'static str,
}
