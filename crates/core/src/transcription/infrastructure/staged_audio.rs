use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::shared::constants::STAGED_FILE_PREFIX;

/// Uploaded audio written to a uniquely named scratch file.
///
/// The file is removed exactly once: by [`StagedAudio::cleanup`] on the
/// normal path, or when the guard is dropped on any other path.
#[derive(Debug)]
pub struct StagedAudio {
    file: NamedTempFile,
}

impl StagedAudio {
    /// Write `bytes` to `dir/transcriba-XXXXXX.<extension>`, fully flushed.
    pub fn create(dir: &Path, bytes: &[u8], extension: &str) -> io::Result<Self> {
        let suffix = format!(".{extension}");
        let mut file = tempfile::Builder::new()
            .prefix(STAGED_FILE_PREFIX)
            .suffix(&suffix)
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;
        file.as_file().sync_all()?;
        log::debug!(
            "Staged {} bytes at {}",
            bytes.len(),
            file.path().display()
        );
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the backing file now, reporting any failure.
    pub fn cleanup(self) -> io::Result<()> {
        let path = self.file.path().to_path_buf();
        self.file.close()?;
        log::debug!("Removed staged audio {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn entries(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_create_writes_bytes_with_extension() {
        let tmp = TempDir::new().unwrap();
        let staged = StagedAudio::create(tmp.path(), b"RIFF0000WAVE", "wav").unwrap();

        let path = staged.path().to_path_buf();
        assert_eq!(path.extension().unwrap(), "wav");
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(STAGED_FILE_PREFIX));
        assert_eq!(fs::read(&path).unwrap(), b"RIFF0000WAVE");
    }

    #[test]
    fn test_extension_case_is_preserved() {
        let tmp = TempDir::new().unwrap();
        let staged = StagedAudio::create(tmp.path(), b"x", "M4A").unwrap();
        assert_eq!(staged.path().extension().unwrap(), "M4A");
    }

    #[test]
    fn test_cleanup_removes_file() {
        let tmp = TempDir::new().unwrap();
        let staged = StagedAudio::create(tmp.path(), b"data", "mp3").unwrap();
        let path = staged.path().to_path_buf();

        staged.cleanup().unwrap();
        assert!(!path.exists());
        assert_eq!(entries(tmp.path()), 0);
    }

    #[test]
    fn test_drop_removes_file() {
        let tmp = TempDir::new().unwrap();
        let path = {
            let staged = StagedAudio::create(tmp.path(), b"data", "flac").unwrap();
            staged.path().to_path_buf()
        };
        assert!(!path.exists());
        assert_eq!(entries(tmp.path()), 0);
    }

    #[test]
    fn test_names_are_unique() {
        let tmp = TempDir::new().unwrap();
        let a = StagedAudio::create(tmp.path(), b"a", "ogg").unwrap();
        let b = StagedAudio::create(tmp.path(), b"b", "ogg").unwrap();
        assert_ne!(a.path(), b.path());
        assert_eq!(entries(tmp.path()), 2);
    }

    #[test]
    fn test_create_in_missing_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing");
        assert!(StagedAudio::create(&missing, b"a", "mp3").is_err());
    }
}
