pub mod openai_provider;
pub mod staged_audio;
