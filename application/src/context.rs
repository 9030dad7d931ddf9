//! Run context
//!
//! One [`RunContext`] exists per orchestration run and is threaded into
//! every stage and agent invocation. It carries the run identity, a
//! snapshot of the run parameters, the elapsed-time budget, and the
//! cancellation token the dispatcher trips when the overall deadline is
//! exceeded. Cloning is cheap and clones share the same cancellation
//! token.

use crate::config::RunParams;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Per-run execution context.
#[derive(Debug, Clone)]
pub struct RunContext {
    run_id: Uuid,
    params: RunParams,
    started: Instant,
    cancel: CancellationToken,
}

impl RunContext {
    pub fn new(params: RunParams) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            params,
            started: Instant::now(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn params(&self) -> &RunParams {
        &self.params
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time left in the overall run budget.
    pub fn remaining_budget(&self) -> Duration {
        self.params.run_timeout.saturating_sub(self.elapsed())
    }

    /// Deadline for a single agent invocation: the configured per-agent
    /// timeout, never exceeding what is left of the run budget.
    pub fn agent_deadline(&self) -> Duration {
        self.params.agent_timeout.min(self.remaining_budget())
    }

    /// Token tripped when the overall run deadline is exceeded.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
