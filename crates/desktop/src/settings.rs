use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use transcriba_core::shared::constants::{OPENAI_BASE_URL, WHISPER_MODEL_NAME};
use transcriba_core::transcription::domain::language::Language;
use transcriba_core::transcription::domain::options::TranscriptionOptions;
use transcriba_core::transcription::infrastructure::openai_provider::ProviderConfig;

/// User preferences remembered between sessions. The API key and transcripts
/// are never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: Language,
    pub translate: bool,
    pub base_url: String,
    pub model: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::Auto,
            translate: false,
            base_url: OPENAI_BASE_URL.to_string(),
            model: WHISPER_MODEL_NAME.to_string(),
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Transcriba").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Ok(json) = serde_json::to_string_pretty(self) {
                if let Err(e) = fs::write(&path, json) {
                    log::warn!("Failed to save settings to {}: {e}", path.display());
                }
            }
        }
    }

    pub fn options(&self) -> TranscriptionOptions {
        TranscriptionOptions::new(self.language, self.translate)
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            ..ProviderConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"language":"pt"}"#).unwrap();
        assert_eq!(settings.language, Language::Pt);
        assert!(!settings.translate);
        assert_eq!(settings.base_url, OPENAI_BASE_URL);
        assert_eq!(settings.model, WHISPER_MODEL_NAME);
    }

    #[test]
    fn test_serialized_form_has_no_credential() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(!json.contains("key"), "unexpected field in {json}");
    }

    #[test]
    fn test_options_follow_settings() {
        let settings = Settings {
            language: Language::De,
            translate: true,
            ..Settings::default()
        };
        let options = settings.options();
        assert_eq!(options.language, Language::De);
        assert!(options.translate);
    }

    #[test]
    fn test_provider_config_has_no_timeout() {
        assert_eq!(Settings::default().provider_config().timeout, None);
    }
}
