use serde::{Deserialize, Serialize};

use crate::model::ids::LanguageId;

/// Languages the client itself is localised into and can request from the
/// translation and context services.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiLanguage {
    #[default]
    Ru,
    En,
    Es,
    De,
    Fr,
}

impl UiLanguage {
    pub const ALL: [UiLanguage; 5] = [
        UiLanguage::Ru,
        UiLanguage::En,
        UiLanguage::Es,
        UiLanguage::De,
        UiLanguage::Fr,
    ];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            UiLanguage::Ru => "ru",
            UiLanguage::En => "en",
            UiLanguage::Es => "es",
            UiLanguage::De => "de",
            UiLanguage::Fr => "fr",
        }
    }

    /// Parse a two-letter code; unknown codes yield `None`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Native-script name shown in language pickers.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            UiLanguage::Ru => "Русский",
            UiLanguage::En => "English",
            UiLanguage::Es => "Español",
            UiLanguage::De => "Deutsch",
            UiLanguage::Fr => "Français",
        }
    }

    /// Name understood by the context-sentence service.
    #[must_use]
    pub fn context_name(self) -> &'static str {
        match self {
            UiLanguage::Ru => "russian",
            UiLanguage::En => "english",
            UiLanguage::Es => "spanish",
            UiLanguage::De => "german",
            UiLanguage::Fr => "french",
        }
    }
}

/// Context-service name for an arbitrary code, falling back to English.
#[must_use]
pub fn context_language_name(code: &str) -> &'static str {
    UiLanguage::from_code(code).map_or("english", UiLanguage::context_name)
}

/// Entry of the backend's language catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageOption {
    pub id: LanguageId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_from_code() {
        for lang in UiLanguage::ALL {
            assert_eq!(UiLanguage::from_code(lang.code()), Some(lang));
        }
        assert_eq!(UiLanguage::from_code("EN"), Some(UiLanguage::En));
        assert_eq!(UiLanguage::from_code("it"), None);
    }

    #[test]
    fn unknown_context_language_falls_back_to_english() {
        assert_eq!(context_language_name("de"), "german");
        assert_eq!(context_language_name("zz"), "english");
    }

    #[test]
    fn default_is_russian() {
        assert_eq!(UiLanguage::default(), UiLanguage::Ru);
    }
}
