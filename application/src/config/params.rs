//! Run parameters — pipeline loop and deadline control.
//!
//! [`RunParams`] groups the static parameters that control one research
//! run: the clarification retry bound, the per-agent and overall
//! deadlines, and the bounds that keep prompts from growing without
//! limit. These are application-layer concerns, not domain policy; the
//! operator sets them through configuration rather than the code fixing
//! them as constants.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Static control parameters for one research run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunParams {
    /// Clarification rounds before the analyzer falls back to a
    /// best-effort envelope instead of asking again.
    pub max_clarification_rounds: usize,
    /// Deadline for a single agent invocation.
    pub agent_timeout: Duration,
    /// Overall deadline for the whole run.
    pub run_timeout: Duration,
    /// Citations kept per agent result.
    pub max_citations_per_agent: usize,
    /// Minimum conversation length before a summary is requested.
    pub summary_min_turns: usize,
    /// Length bound for the conversation digest.
    pub summary_max_chars: usize,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            max_clarification_rounds: 3,
            agent_timeout: Duration::from_secs(30),
            run_timeout: Duration::from_secs(120),
            max_citations_per_agent: 10,
            summary_min_turns: 4,
            summary_max_chars: 1200,
        }
    }
}

impl RunParams {
    // ==================== Builder Methods ====================

    pub fn with_max_clarification_rounds(mut self, max: usize) -> Self {
        self.max_clarification_rounds = max;
        self
    }

    pub fn with_agent_timeout(mut self, timeout: Duration) -> Self {
        self.agent_timeout = timeout;
        self
    }

    pub fn with_run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = timeout;
        self
    }

    pub fn with_max_citations_per_agent(mut self, max: usize) -> Self {
        self.max_citations_per_agent = max;
        self
    }
}
