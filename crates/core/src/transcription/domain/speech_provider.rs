use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::api_key::ApiKey;
use super::language::Language;

/// One request to the provider: the staged audio plus an optional language hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    audio_path: PathBuf,
    language: Option<&'static str>,
}

impl ProviderRequest {
    pub fn new(audio_path: &Path, language: Language) -> Self {
        Self {
            audio_path: audio_path.to_path_buf(),
            language: language.hint(),
        }
    }

    pub fn audio_path(&self) -> &Path {
        &self.audio_path
    }

    /// ISO-639-1 hint, `None` when the provider should detect the language.
    pub fn language(&self) -> Option<&'static str> {
        self.language
    }
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
    #[error("failed to read staged audio: {0}")]
    Io(#[from] io::Error),
}

/// External speech-to-text service.
///
/// The two methods are the provider's two request shapes; a job calls exactly
/// one of them, once.
pub trait SpeechProvider: Send + Sync {
    /// Text in the spoken language.
    fn transcribe(&self, request: &ProviderRequest, key: &ApiKey) -> Result<String, ProviderError>;

    /// English text regardless of the spoken language.
    fn translate(&self, request: &ProviderRequest, key: &ApiKey) -> Result<String, ProviderError>;
}
