use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use crate::pipeline::pipeline_stage::{PipelineStage, StageObserver};
use crate::shared::constants::{AUDIO_EXTENSIONS, MAX_UPLOAD_BYTES};
use crate::transcription::domain::api_key::ApiKey;
use crate::transcription::domain::audio_upload::AudioUpload;
use crate::transcription::domain::options::{TranscriptionOptions, TranscriptionTask};
use crate::transcription::domain::speech_provider::{ProviderRequest, SpeechProvider};
use crate::transcription::domain::transcript::Transcript;
use crate::transcription::domain::transcription_error::TranscriptionError;
use crate::transcription::infrastructure::staged_audio::StagedAudio;

pub type TranscriptionResult = Result<Transcript, TranscriptionError>;

/// Turns one uploaded audio file into text through an external provider.
///
/// Each call to [`run`](Self::run) is independent: the upload is validated,
/// staged to a scratch file, sent with exactly one provider request and the
/// scratch file is removed before the result is returned.
pub struct TranscribeUploadUseCase {
    provider: Box<dyn SpeechProvider>,
    staging_dir: PathBuf,
    observer: Option<StageObserver>,
}

impl TranscribeUploadUseCase {
    pub fn new(provider: Box<dyn SpeechProvider>) -> Self {
        Self {
            provider,
            staging_dir: std::env::temp_dir(),
            observer: None,
        }
    }

    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    pub fn with_observer(mut self, observer: StageObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn run(
        &self,
        upload: &AudioUpload,
        options: &TranscriptionOptions,
        key: Option<&ApiKey>,
    ) -> TranscriptionResult {
        self.report(PipelineStage::Idle);
        let result = self.run_stages(upload, options, key);
        match &result {
            Ok(transcript) => {
                log::info!(
                    "Transcribed {} ({} characters)",
                    upload.filename(),
                    transcript.char_count()
                );
                self.report(PipelineStage::Completed);
            }
            Err(e) => {
                log::warn!("Transcription of {} failed: {e}", upload.filename());
                self.report(PipelineStage::Failed);
            }
        }
        result
    }

    fn run_stages(
        &self,
        upload: &AudioUpload,
        options: &TranscriptionOptions,
        key: Option<&ApiKey>,
    ) -> TranscriptionResult {
        self.report(PipelineStage::Validating);
        self.validate(upload)?;
        let key = key.ok_or(TranscriptionError::MissingCredential)?;

        let staged = self.stage(upload)?;
        self.report(PipelineStage::Staged);

        self.report(PipelineStage::AwaitingProvider);
        let result = self.transcribe(&staged, options, key);
        self.cleanup(staged);
        result
    }

    /// Reject uploads the provider would refuse, before any I/O.
    pub fn validate(&self, upload: &AudioUpload) -> Result<(), TranscriptionError> {
        validate_upload(upload)
    }

    /// Write the upload to a fresh scratch file that keeps its extension.
    pub fn stage(&self, upload: &AudioUpload) -> Result<StagedAudio, TranscriptionError> {
        let extension =
            upload
                .extension()
                .ok_or_else(|| TranscriptionError::UnsupportedFormat {
                    extension: String::new(),
                })?;
        StagedAudio::create(&self.staging_dir, upload.bytes(), extension)
            .map_err(TranscriptionError::Staging)
    }

    /// Issue exactly one provider request for the staged audio.
    pub fn transcribe(
        &self,
        staged: &StagedAudio,
        options: &TranscriptionOptions,
        key: &ApiKey,
    ) -> TranscriptionResult {
        let request = ProviderRequest::new(staged.path(), options.language);
        let task = options.task();
        log::debug!(
            "Requesting {task:?} for {} (language: {})",
            staged.path().display(),
            options.language.code()
        );

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| match task {
            TranscriptionTask::Transcribe => self.provider.transcribe(&request, key),
            TranscriptionTask::Translate => self.provider.translate(&request, key),
        }));

        match outcome {
            Ok(Ok(text)) => Ok(Transcript::new(text)),
            Ok(Err(e)) => Err(TranscriptionError::Provider(non_empty(e.to_string()))),
            Err(payload) => Err(TranscriptionError::Provider(non_empty(panic_message(
                payload.as_ref(),
            )))),
        }
    }

    /// Remove the scratch file. Failures are logged, never returned, so they
    /// cannot replace the transcription outcome.
    pub fn cleanup(&self, staged: StagedAudio) {
        let path = staged.path().to_path_buf();
        if let Err(e) = staged.cleanup() {
            log::warn!("Failed to remove staged audio {}: {e}", path.display());
        }
    }

    fn report(&self, stage: PipelineStage) {
        log::debug!("Pipeline stage: {stage}");
        if let Some(ref observer) = self.observer {
            observer(stage);
        }
    }
}

/// Size, format and emptiness checks shared by the pipeline and the shells,
/// which report problems as soon as a file is picked.
pub fn validate_upload(upload: &AudioUpload) -> Result<(), TranscriptionError> {
    let size = upload.size();
    if size > MAX_UPLOAD_BYTES {
        return Err(TranscriptionError::SizeExceeded { size });
    }
    let extension = upload.extension().unwrap_or_default();
    if !is_supported_extension(extension) {
        return Err(TranscriptionError::UnsupportedFormat {
            extension: extension.to_string(),
        });
    }
    if size == 0 {
        return Err(TranscriptionError::EmptyUpload);
    }
    log::debug!(
        "Validated {} ({:.1}MB)",
        upload.filename(),
        upload.size_mib()
    );
    Ok(())
}

pub fn is_supported_extension(extension: &str) -> bool {
    let lower = extension.to_ascii_lowercase();
    AUDIO_EXTENSIONS.contains(&lower.as_str())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::new()
    }
}

fn non_empty(message: String) -> String {
    if message.trim().is_empty() {
        "unexpected provider failure".to_string()
    } else {
        message
    }
}
