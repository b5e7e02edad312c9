use crate::shared::constants::{TRANSCRIPT_FILE_NAME, TRANSCRIPT_MIME_TYPE};

/// Text returned by the provider for one upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    pub const FILE_NAME: &'static str = TRANSCRIPT_FILE_NAME;
    pub const MIME_TYPE: &'static str = TRANSCRIPT_MIME_TYPE;

    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_metadata() {
        assert_eq!(Transcript::FILE_NAME, "transcricao.txt");
        assert_eq!(Transcript::MIME_TYPE, "text/plain");
    }

    #[test]
    fn test_char_count_counts_unicode_scalars() {
        let t = Transcript::new("transcrição");
        assert_eq!(t.char_count(), 11);
        assert!(t.text().len() > 11);
    }
}
