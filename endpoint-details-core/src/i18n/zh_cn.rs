//! 中文翻译 (zh-CN)

use super::keys::{
    CommonTexts, FooterTexts, NotificationTexts, PolicyResponseTexts, TabTexts, Translations,
};

pub const TRANSLATIONS: Translations = Translations {
    common: CommonTexts {
        loading: "加载中...",
        close: "关闭",
    },
    tabs: TabTexts {
        overview: "概览",
        activity_log: "活动日志",
    },
    policy_response: PolicyResponseTexts {
        title: "策略响应",
        no_policy_response: "暂无策略响应",
        back_to_details: "终端详情",
    },
    footer: FooterTexts {
        isolate: "隔离主机",
        release: "解除隔离",
        view_policy_response: "查看策略响应",
        view_details: "查看主机详情",
    },
    notifications: NotificationTexts {
        host_not_found_title: "找不到主机",
        host_not_found_body: "请关闭面板并选择一个可用的主机。",
    },
};
