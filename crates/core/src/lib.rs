pub mod export;
pub mod pipeline;
pub mod shared;
pub mod transcription;
