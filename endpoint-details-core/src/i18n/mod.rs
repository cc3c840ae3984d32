//! Internationalization (i18n)
//!
//! Plain Rust structs per language: compile-time checked, no runtime lookup.

mod en_us;
pub mod keys;
mod zh_cn;

use serde::{Deserialize, Serialize};

pub use keys::*;

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    /// English (United States)
    #[default]
    #[serde(rename = "en-US", alias = "en")]
    EnUs,
    /// Simplified Chinese (China)
    #[serde(rename = "zh-CN", alias = "zh")]
    ZhCn,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[Language::EnUs, Language::ZhCn]
    }

    /// BCP 47 language code
    pub fn code(&self) -> &'static str {
        match self {
            Language::EnUs => "en-US",
            Language::ZhCn => "zh-CN",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "en-US" | "en" => Some(Language::EnUs),
            "zh-CN" | "zh" => Some(Language::ZhCn),
            _ => None,
        }
    }

    /// Translation table of this language
    pub fn translations(&self) -> &'static Translations {
        match self {
            Language::EnUs => &en_us::TRANSLATIONS,
            Language::ZhCn => &zh_cn::TRANSLATIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for lang in Language::all() {
            assert_eq!(Language::from_code(lang.code()), Some(*lang));
        }
        assert_eq!(Language::from_code("fr"), None);
    }

    #[test]
    fn tables_differ_per_language() {
        assert_eq!(Language::EnUs.translations().tabs.overview, "Overview");
        assert_eq!(Language::ZhCn.translations().tabs.overview, "概览");
    }
}
