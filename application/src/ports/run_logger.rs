//! Run trace logging port
//!
//! One record per stage outcome per run, for offline inspection of what
//! a run did and why. The adapter decides the storage format (the shipped
//! one appends JSONL).

use research_domain::RunStage;
use uuid::Uuid;

/// Sink for run trace records
pub trait RunLogger: Send + Sync {
    /// Record one stage outcome. `detail` carries stage-specific data
    /// (selected agents, per-agent statuses, clarification text).
    fn log_stage(&self, run_id: Uuid, stage: RunStage, detail: &serde_json::Value);
}

/// No-op logger for when run tracing is not needed
pub struct NoRunLogger;

impl RunLogger for NoRunLogger {
    fn log_stage(&self, _run_id: Uuid, _stage: RunStage, _detail: &serde_json::Value) {}
}
