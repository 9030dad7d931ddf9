//! Aggregated response value object
//!
//! Terminal artifact of the core pipeline: one synthesized answer, the
//! deduplicated citation sequence, and the per-agent outcomes so callers
//! can show which sources were unavailable.

use crate::citation::Citation;
use crate::retrieval::{AgentResult, AgentStatus};
use crate::source::SourceKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Synthesized result of one research run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedResponse {
    /// The query the answer addresses (rewritten form)
    pub query: String,
    /// Synthesized answer text
    pub answer: String,
    /// Deduplicated citations, in deterministic first-seen order
    pub citations: Vec<Citation>,
    /// Final status of every dispatched agent
    pub agent_statuses: BTreeMap<SourceKind, AgentStatus>,
    /// True when every agent failed and no answer could be grounded
    pub failed_overall: bool,
}

impl AggregatedResponse {
    pub fn new(
        query: impl Into<String>,
        answer: impl Into<String>,
        citations: Vec<Citation>,
        agent_statuses: BTreeMap<SourceKind, AgentStatus>,
    ) -> Self {
        Self {
            query: query.into(),
            answer: answer.into(),
            citations,
            agent_statuses,
            failed_overall: false,
        }
    }

    /// Response for the branch where every agent failed: no citations, an
    /// explanatory answer, and the failed-overall flag set.
    pub fn all_sources_failed(
        query: impl Into<String>,
        agent_statuses: BTreeMap<SourceKind, AgentStatus>,
    ) -> Self {
        let sources = agent_statuses
            .keys()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            query: query.into(),
            answer: format!(
                "No sources were available to answer this question. \
                 All selected agents failed ({sources}). \
                 Try rephrasing the query or selecting different sources."
            ),
            citations: Vec::new(),
            agent_statuses,
            failed_overall: true,
        }
    }

    /// Agents whose results could not be used.
    pub fn unavailable_sources(&self) -> Vec<SourceKind> {
        self.agent_statuses
            .iter()
            .filter(|(_, s)| **s == AgentStatus::Failed)
            .map(|(k, _)| *k)
            .collect()
    }

    /// Agents that contributed material to the answer.
    pub fn contributing_sources(&self) -> Vec<SourceKind> {
        self.agent_statuses
            .iter()
            .filter(|(_, s)| **s != AgentStatus::Failed)
            .map(|(k, _)| *k)
            .collect()
    }
}

/// Collect the per-agent status map from a set of results.
pub fn status_map(results: &BTreeMap<SourceKind, AgentResult>) -> BTreeMap<SourceKind, AgentStatus> {
    results.iter().map(|(k, r)| (*k, r.status)).collect()
}
