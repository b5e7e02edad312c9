use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::transcription::domain::transcript::Transcript;

/// Write the transcript as `transcricao.txt` inside `dir`.
pub fn save_to_dir(transcript: &Transcript, dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(Transcript::FILE_NAME);
    save_as(transcript, &path)?;
    Ok(path)
}

/// Write the transcript as UTF-8 plain text at `path`.
pub fn save_as(transcript: &Transcript, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, transcript.text())?;
    log::info!("Transcript written to {}", path.display());
    Ok(())
}
