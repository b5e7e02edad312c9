use std::thread;

use crossbeam_channel::{Receiver, Sender};

use transcriba_core::pipeline::pipeline_stage::PipelineStage;
use transcriba_core::pipeline::transcribe_upload_use_case::TranscribeUploadUseCase;
use transcriba_core::transcription::domain::api_key::ApiKey;
use transcriba_core::transcription::domain::audio_upload::AudioUpload;
use transcriba_core::transcription::domain::options::TranscriptionOptions;
use transcriba_core::transcription::domain::transcript::Transcript;
use transcriba_core::transcription::infrastructure::openai_provider::{
    OpenAiProvider, ProviderConfig,
};

/// Messages sent from the worker thread to the UI.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    Stage(PipelineStage),
    Complete(Transcript),
    Error(String),
}

/// Everything one transcription job needs. Owned by the worker thread.
pub struct TranscriptionParams {
    pub upload: AudioUpload,
    pub options: TranscriptionOptions,
    pub api_key: Option<ApiKey>,
    pub provider: ProviderConfig,
}

/// Run one job on a background thread. The receiver yields stage updates
/// followed by exactly one `Complete` or `Error`.
pub fn spawn(params: TranscriptionParams) -> Receiver<WorkerMessage> {
    let (tx, rx) = crossbeam_channel::unbounded::<WorkerMessage>();

    thread::spawn(move || {
        let message = match run_transcription(&tx, params) {
            Ok(transcript) => WorkerMessage::Complete(transcript),
            Err(e) => WorkerMessage::Error(e.to_string()),
        };
        let _ = tx.send(message);
    });

    rx
}

fn run_transcription(
    tx: &Sender<WorkerMessage>,
    params: TranscriptionParams,
) -> Result<Transcript, Box<dyn std::error::Error>> {
    let provider = OpenAiProvider::new(params.provider)?;

    let tx_stage = tx.clone();
    let use_case = TranscribeUploadUseCase::new(Box::new(provider)).with_observer(Box::new(
        move |stage: PipelineStage| {
            let _ = tx_stage.send(WorkerMessage::Stage(stage));
        },
    ));

    let transcript = use_case.run(&params.upload, &params.options, params.api_key.as_ref())?;
    Ok(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(rx: Receiver<WorkerMessage>) -> Vec<WorkerMessage> {
        rx.iter().collect()
    }

    #[test]
    fn test_missing_key_reports_error_without_staging() {
        let rx = spawn(TranscriptionParams {
            upload: AudioUpload::new(b"ID3".to_vec(), "a.mp3"),
            options: TranscriptionOptions::default(),
            api_key: None,
            provider: ProviderConfig::default(),
        });

        let messages = drain(rx);
        let stages: Vec<_> = messages
            .iter()
            .filter_map(|m| match m {
                WorkerMessage::Stage(s) => Some(*s),
                _ => None,
            })
            .collect();
        assert!(!stages.contains(&PipelineStage::Staged));
        assert_eq!(stages.last(), Some(&PipelineStage::Failed));
        match messages.last() {
            Some(WorkerMessage::Error(e)) => assert!(e.contains("API key"), "got {e}"),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn test_oversized_upload_reports_size() {
        let rx = spawn(TranscriptionParams {
            upload: AudioUpload::new(vec![0; 26 * 1024 * 1024], "big.wav"),
            options: TranscriptionOptions::default(),
            api_key: ApiKey::new("sk-test"),
            provider: ProviderConfig::default(),
        });

        match drain(rx).last() {
            Some(WorkerMessage::Error(e)) => assert!(e.contains("26.0MB"), "got {e}"),
            other => panic!("expected Error, got {other:?}"),
        }
    }
}
