//! Supported summary languages

use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target languages the summarizer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "zh-cn")]
    SimplifiedChinese,
    #[serde(rename = "zh-tw")]
    TraditionalChinese,
    #[serde(rename = "yue")]
    Cantonese,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "de")]
    German,
}

impl Language {
    /// All languages in display order
    pub const ALL: [Language; 10] = [
        Language::SimplifiedChinese,
        Language::TraditionalChinese,
        Language::Cantonese,
        Language::Japanese,
        Language::English,
        Language::Korean,
        Language::French,
        Language::Spanish,
        Language::Russian,
        Language::German,
    ];

    /// Short language code
    pub fn code(self) -> &'static str {
        match self {
            Language::SimplifiedChinese => "zh-cn",
            Language::TraditionalChinese => "zh-tw",
            Language::Cantonese => "yue",
            Language::Japanese => "ja",
            Language::English => "en",
            Language::Korean => "ko",
            Language::French => "fr",
            Language::Spanish => "es",
            Language::Russian => "ru",
            Language::German => "de",
        }
    }

    /// Name used in the summary instruction
    pub fn display_name(self) -> &'static str {
        match self {
            Language::SimplifiedChinese => "Simplified Chinese",
            Language::TraditionalChinese => "Traditional Chinese",
            Language::Cantonese => "Cantonese",
            Language::Japanese => "Japanese",
            Language::English => "English",
            Language::Korean => "Korean",
            Language::French => "French",
            Language::Spanish => "Spanish",
            Language::Russian => "Russian",
            Language::German => "German",
        }
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(code: &str) -> AppResult<Self> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| AppError::Config(format!("Unsupported language code: {}", code)))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_parse_back() {
        for lang in Language::ALL {
            assert_eq!(lang.code().parse::<Language>().unwrap(), lang);
        }
    }

    #[test]
    fn test_unknown_code() {
        let err = "xx".parse::<Language>().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&Language::SimplifiedChinese).unwrap();
        assert_eq!(json, "\"zh-cn\"");
        let lang: Language = serde_json::from_str("\"yue\"").unwrap();
        assert_eq!(lang.display_name(), "Cantonese");
    }
}
