use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language of the spoken audio. `Auto` lets the provider detect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Auto,
    Pt,
    En,
    Es,
    Fr,
    De,
    It,
    Ja,
    Ko,
    Zh,
    Ru,
    Ar,
    Hi,
    Nl,
    Tr,
}

impl Language {
    pub const ALL: &[Language] = &[
        Language::Auto,
        Language::Pt,
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::It,
        Language::Ja,
        Language::Ko,
        Language::Zh,
        Language::Ru,
        Language::Ar,
        Language::Hi,
        Language::Nl,
        Language::Tr,
    ];

    /// ISO-639-1 code, or `"auto"` for the detection sentinel.
    pub fn code(self) -> &'static str {
        match self {
            Language::Auto => "auto",
            Language::Pt => "pt",
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::It => "it",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Zh => "zh",
            Language::Ru => "ru",
            Language::Ar => "ar",
            Language::Hi => "hi",
            Language::Nl => "nl",
            Language::Tr => "tr",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::Auto => "Detecção automática",
            Language::Pt => "Português",
            Language::En => "Inglês",
            Language::Es => "Espanhol",
            Language::Fr => "Francês",
            Language::De => "Alemão",
            Language::It => "Italiano",
            Language::Ja => "Japonês",
            Language::Ko => "Coreano",
            Language::Zh => "Chinês",
            Language::Ru => "Russo",
            Language::Ar => "Árabe",
            Language::Hi => "Hindi",
            Language::Nl => "Holandês",
            Language::Tr => "Turco",
        }
    }

    /// Explicit hint to send to the provider. `None` means the field is omitted.
    pub fn hint(self) -> Option<&'static str> {
        match self {
            Language::Auto => None,
            other => Some(other.code()),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language code '{0}' (expected auto, pt, en, es, fr, de, it, ja, ko, zh, ru, ar, hi, nl or tr)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}
