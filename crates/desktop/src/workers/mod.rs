pub mod transcription_worker;
