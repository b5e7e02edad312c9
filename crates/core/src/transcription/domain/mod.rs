pub mod api_key;
pub mod audio_upload;
pub mod language;
pub mod options;
pub mod speech_provider;
pub mod transcript;
pub mod transcription_error;
