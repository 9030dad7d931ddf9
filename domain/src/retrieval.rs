//! Retrieval result value objects
//!
//! An [`AgentResult`] is produced exactly once per agent invocation per run
//! and is immutable afterwards. Recoverable upstream conditions (empty
//! result set, rate limiting, partial data) are `Partial`; only deadline
//! overruns and unrecoverable faults are `Failed`. Agents never propagate
//! errors out of their invocation — the status field carries the outcome.

use crate::citation::Citation;
use crate::source::SourceKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of one agent invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// Retrieval succeeded
    Ok,
    /// Some data was recovered despite an upstream problem
    Partial,
    /// Nothing usable was retrieved
    Failed,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Ok => "ok",
            AgentStatus::Partial => "partial",
            AgentStatus::Failed => "failed",
        }
    }
}

/// Result of one retrieval agent invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResult {
    /// Which agent produced this result
    pub agent: SourceKind,
    pub status: AgentStatus,
    /// The agent's answer text (empty when failed)
    pub answer: String,
    /// Citations recovered from the source
    pub citations: Vec<Citation>,
    /// Error detail, present iff status is not `Ok`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AgentResult {
    /// Creates a successful result.
    pub fn ok(agent: SourceKind, answer: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self {
            agent,
            status: AgentStatus::Ok,
            answer: answer.into(),
            citations,
            error: None,
        }
    }

    /// Creates a partial result: whatever was recoverable, plus the reason
    /// retrieval was incomplete.
    pub fn partial(
        agent: SourceKind,
        answer: impl Into<String>,
        citations: Vec<Citation>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            agent,
            status: AgentStatus::Partial,
            answer: answer.into(),
            citations,
            error: Some(error.into()),
        }
    }

    /// Creates a failed result with no recoverable data.
    pub fn failed(agent: SourceKind, error: impl Into<String>) -> Self {
        Self {
            agent,
            status: AgentStatus::Failed,
            answer: String::new(),
            citations: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Creates a failed result for a deadline overrun. Timeouts share the
    /// `Failed` status and are distinguished only by their error detail.
    pub fn timed_out(agent: SourceKind, deadline: Duration) -> Self {
        Self::failed(
            agent,
            format!("timed out after {:.1}s", deadline.as_secs_f64()),
        )
    }

    /// Whether this result contributes material to aggregation.
    pub fn is_usable(&self) -> bool {
        self.status != AgentStatus::Failed
    }

    /// Whether the error detail marks this failure as a timeout.
    pub fn is_timeout(&self) -> bool {
        self.error
            .as_deref()
            .is_some_and(|e| e.starts_with("timed out"))
    }

    /// Drop citations beyond `cap`, keeping the best-scored ones first
    /// when scores are present and input order otherwise.
    pub fn truncate_citations(&mut self, cap: usize) {
        if self.citations.len() <= cap {
            return;
        }
        self.citations.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        self.citations.truncate(cap);
    }
}
