use super::language::Language;

/// Which provider request shape a job uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptionTask {
    /// Text in the language that was spoken.
    Transcribe,
    /// English text regardless of the spoken language.
    Translate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranscriptionOptions {
    pub language: Language,
    pub translate: bool,
}

impl TranscriptionOptions {
    pub fn new(language: Language, translate: bool) -> Self {
        Self {
            language,
            translate,
        }
    }

    pub fn task(&self) -> TranscriptionTask {
        if self.translate {
            TranscriptionTask::Translate
        } else {
            TranscriptionTask::Transcribe
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_auto_transcribe() {
        let opts = TranscriptionOptions::default();
        assert_eq!(opts.language, Language::Auto);
        assert_eq!(opts.task(), TranscriptionTask::Transcribe);
    }

    #[test]
    fn test_translate_flag_selects_translate_task() {
        let opts = TranscriptionOptions::new(Language::Fr, true);
        assert_eq!(opts.task(), TranscriptionTask::Translate);
    }
}
