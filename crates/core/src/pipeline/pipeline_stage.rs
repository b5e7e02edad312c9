use std::fmt;

/// Lifecycle of one transcription job.
///
/// `Idle -> Validating -> Staged -> AwaitingProvider -> Completed | Failed`.
/// Validation failures jump straight from `Validating` to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Validating,
    Staged,
    AwaitingProvider,
    Completed,
    Failed,
}

impl PipelineStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineStage::Completed | PipelineStage::Failed)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Validating => "validating",
            PipelineStage::Staged => "staged",
            PipelineStage::AwaitingProvider => "awaiting provider",
            PipelineStage::Completed => "completed",
            PipelineStage::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Observer for stage transitions, e.g. a GUI status line.
pub type StageObserver = Box<dyn Fn(PipelineStage) + Send>;
