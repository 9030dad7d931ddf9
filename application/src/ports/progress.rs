//! Progress notification port
//!
//! Defines the interface for reporting progress during a research run.
//! Implementations live in the presentation layer and can display
//! progress in various ways (console, progress bars, logs).

use research_domain::{RunStage, SourceKind};

/// Callback for progress updates during a research run
pub trait ProgressNotifier: Send + Sync {
    /// Called when a pipeline stage starts. `total_tasks` is the number
    /// of parallel tasks within the stage (1 for the sequential stages).
    fn on_stage_start(&self, stage: RunStage, total_tasks: usize);

    /// Called when one agent finishes within the retrieval stage.
    fn on_agent_complete(&self, stage: RunStage, agent: SourceKind, success: bool);

    /// Called when a pipeline stage completes.
    fn on_stage_complete(&self, stage: RunStage);

    /// Called when the analyzer asks the user for clarification.
    fn on_clarification(&self, _message: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: RunStage, _total_tasks: usize) {}
    fn on_agent_complete(&self, _stage: RunStage, _agent: SourceKind, _success: bool) {}
    fn on_stage_complete(&self, _stage: RunStage) {}
}
