use std::time::Duration;

use reqwest::blocking::multipart::Form;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::shared::constants::{OPENAI_BASE_URL, WHISPER_MODEL_NAME};
use crate::transcription::domain::api_key::ApiKey;
use crate::transcription::domain::options::TranscriptionTask;
use crate::transcription::domain::speech_provider::{ProviderError, ProviderRequest, SpeechProvider};

/// Connection settings for an OpenAI-compatible audio API.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub model: String,
    /// `None` blocks until the provider answers.
    pub timeout: Option<Duration>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: OPENAI_BASE_URL.to_string(),
            model: WHISPER_MODEL_NAME.to_string(),
            timeout: None,
        }
    }
}

/// Speech provider backed by the OpenAI audio endpoints
/// (`/audio/transcriptions` and `/audio/translations`).
#[derive(Debug)]
pub struct OpenAiProvider {
    client: Client,
    config: ProviderConfig,
}

#[derive(Deserialize)]
struct TextResponse {
    text: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAiProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ProviderError::Request)?;
        Ok(Self { client, config })
    }

    pub fn endpoint(&self, task: TranscriptionTask) -> String {
        let path = match task {
            TranscriptionTask::Transcribe => "audio/transcriptions",
            TranscriptionTask::Translate => "audio/translations",
        };
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn send(
        &self,
        task: TranscriptionTask,
        request: &ProviderRequest,
        key: &ApiKey,
    ) -> Result<String, ProviderError> {
        let mut form = Form::new()
            .text("model", self.config.model.clone())
            .text("response_format", "json")
            .file("file", request.audio_path())?;
        if let Some(language) = request.language() {
            form = form.text("language", language);
        }

        let url = self.endpoint(task);
        log::info!(
            "Sending {} to {url} (language: {})",
            request.audio_path().display(),
            request.language().unwrap_or("auto")
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(key.expose())
            .multipart(form)
            .send()
            .map_err(ProviderError::Request)?;

        let status = response.status();
        let body = response
            .text()
            .map_err(ProviderError::Request)?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &body),
            });
        }

        let parsed = parse_text(&body)?;
        log::info!("Provider returned {} characters", parsed.chars().count());
        Ok(parsed)
    }
}

impl SpeechProvider for OpenAiProvider {
    fn transcribe(&self, request: &ProviderRequest, key: &ApiKey) -> Result<String, ProviderError> {
        self.send(TranscriptionTask::Transcribe, request, key)
    }

    fn translate(&self, request: &ProviderRequest, key: &ApiKey) -> Result<String, ProviderError> {
        self.send(TranscriptionTask::Translate, request, key)
    }
}

fn parse_text(body: &str) -> Result<String, ProviderError> {
    serde_json::from_str::<TextResponse>(body)
        .map(|r| r.text)
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
}

/// Provider error message, unwrapped from `{"error": {"message": ...}}` when present.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        if !parsed.error.message.trim().is_empty() {
            return parsed.error.message;
        }
    }
    let body = body.trim();
    if body.is_empty() {
        format!("provider returned status {status}")
    } else {
        format!("provider returned status {status}: {body}")
    }
}
