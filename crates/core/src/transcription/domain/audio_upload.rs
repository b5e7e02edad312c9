use std::fs;
use std::io;
use std::path::Path;

use crate::shared::constants::BYTES_PER_MIB;

/// An uploaded audio file held in memory for the duration of one request.
#[derive(Clone, Debug)]
pub struct AudioUpload {
    bytes: Vec<u8>,
    filename: String,
}

impl AudioUpload {
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        Self {
            bytes,
            filename: filename.into(),
        }
    }

    /// Read an upload from disk, keeping only its file name.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self::new(bytes, filename))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn size_mib(&self) -> f64 {
        self.size() as f64 / BYTES_PER_MIB as f64
    }

    /// Extension exactly as uploaded, without the dot.
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
    }
}
