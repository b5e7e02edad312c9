use std::io;

use thiserror::Error;

use crate::shared::constants::{BYTES_PER_MIB, MAX_UPLOAD_BYTES};

/// Why a transcription job produced no text.
///
/// Every variant is recoverable by the user: fix the input and retry.
#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("no provider API key was supplied")]
    MissingCredential,
    #[error(
        "file too large: {:.1}MB (provider limit: {}MB)",
        mib(.size),
        MAX_UPLOAD_BYTES / BYTES_PER_MIB
    )]
    SizeExceeded { size: u64 },
    #[error("unsupported audio format '{extension}' (expected mp3, mp4, wav, m4a, webm, ogg or flac)")]
    UnsupportedFormat { extension: String },
    #[error("the uploaded file is empty")]
    EmptyUpload,
    #[error("failed to stage audio for upload: {0}")]
    Staging(#[source] io::Error),
    #[error("{0}")]
    Provider(String),
}

fn mib(size: &u64) -> f64 {
    *size as f64 / BYTES_PER_MIB as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_exceeded_message_shows_megabytes() {
        let err = TranscriptionError::SizeExceeded {
            size: 30 * BYTES_PER_MIB + BYTES_PER_MIB / 2,
        };
        assert_eq!(err.to_string(), "file too large: 30.5MB (provider limit: 25MB)");
    }

    #[test]
    fn test_provider_message_is_verbatim() {
        let err = TranscriptionError::Provider("Incorrect API key provided".to_string());
        assert_eq!(err.to_string(), "Incorrect API key provided");
    }

    #[test]
    fn test_staging_error_keeps_io_source() {
        use std::error::Error as _;
        let err = TranscriptionError::Staging(io::Error::other("disk full"));
        assert_eq!(err.to_string(), "failed to stage audio for upload: disk full");
        assert!(err.source().is_some());
    }
}
