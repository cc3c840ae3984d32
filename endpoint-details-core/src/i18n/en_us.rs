//! English translations (en-US)

use super::keys::{
    CommonTexts, FooterTexts, NotificationTexts, PolicyResponseTexts, TabTexts, Translations,
};

pub const TRANSLATIONS: Translations = Translations {
    common: CommonTexts {
        loading: "Loading...",
        close: "Close",
    },
    tabs: TabTexts {
        overview: "Overview",
        activity_log: "Activity Log",
    },
    policy_response: PolicyResponseTexts {
        title: "Policy Response",
        no_policy_response: "No policy response available",
        back_to_details: "Endpoint Details",
    },
    footer: FooterTexts {
        isolate: "Isolate host",
        release: "Release host",
        view_policy_response: "View policy response",
        view_details: "View host details",
    },
    notifications: NotificationTexts {
        host_not_found_title: "Could not find host",
        host_not_found_body: "Please exit the flyout and select an available host.",
    },
};
