/// Provider hard limit on uploaded audio (25 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 25 * BYTES_PER_MIB;
pub const BYTES_PER_MIB: u64 = 1024 * 1024;

/// Extensions the provider can decode. It picks the decoder from the file
/// extension, so staged files keep the uploaded one.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "mp4", "wav", "m4a", "webm", "ogg", "flac"];

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const WHISPER_MODEL_NAME: &str = "whisper-1";

pub const TRANSCRIPT_FILE_NAME: &str = "transcricao.txt";
pub const TRANSCRIPT_MIME_TYPE: &str = "text/plain";

pub const STAGED_FILE_PREFIX: &str = "transcriba-";
