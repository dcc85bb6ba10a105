use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A user interface locale supported by the client.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum Language {
    /// Brazilian Portuguese.
    #[default]
    #[serde(rename = "pt-BR")]
    #[strum(serialize = "pt-BR")]
    PtBr,
    /// English.
    #[serde(rename = "en")]
    #[strum(serialize = "en")]
    En,
}

impl Language {
    /// Locale code as persisted and sent to the agent.
    pub fn code(self) -> &'static str {
        match self {
            Language::PtBr => "pt-BR",
            Language::En => "en",
        }
    }

    /// Native display label.
    pub fn label(self) -> &'static str {
        match self {
            Language::PtBr => "Português (Brasil)",
            Language::En => "English",
        }
    }

    /// Parses a locale code; only exact supported codes are accepted.
    pub fn from_code(code: &str) -> Option<Self> {
        code.parse().ok()
    }
}

/// A `{code, label}` pair for language pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    /// Locale.
    pub language: Language,
    /// Locale code.
    pub code: &'static str,
    /// Native display label.
    pub label: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_strum() {
        assert_eq!(Language::from_code("pt-BR"), Some(Language::PtBr));
        assert_eq!(Language::from_code("en"), Some(Language::En));
        assert_eq!(Language::PtBr.to_string(), "pt-BR");
    }

    #[test]
    fn codes_are_case_sensitive() {
        assert_eq!(Language::from_code("pt-br"), None);
        assert_eq!(Language::from_code("EN"), None);
        assert_eq!(Language::from_code("fr"), None);
    }

    #[test]
    fn serde_uses_locale_codes() {
        assert_eq!(serde_json::to_string(&Language::PtBr).unwrap(), "\"pt-BR\"");
        let parsed: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Language::En);
    }
}
