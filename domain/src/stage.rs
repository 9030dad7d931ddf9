//! Pipeline stage identifiers

use serde::{Deserialize, Serialize};

/// The stages of one research run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStage {
    /// Conversation summary + query rewrite / clarification decision
    Analyze,
    /// Agent selection and sub-query generation
    Classify,
    /// Parallel retrieval fan-out
    Retrieve,
    /// Synthesis and citation merging
    Aggregate,
    /// Optional study-plan derivation
    Plan,
}

impl RunStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStage::Analyze => "analyze",
            RunStage::Classify => "classify",
            RunStage::Retrieve => "retrieve",
            RunStage::Aggregate => "aggregate",
            RunStage::Plan => "plan",
        }
    }

    /// Human-readable name for progress display.
    pub fn display_name(&self) -> &'static str {
        match self {
            RunStage::Analyze => "Analyzing query",
            RunStage::Classify => "Selecting sources",
            RunStage::Retrieve => "Retrieving",
            RunStage::Aggregate => "Synthesizing answer",
            RunStage::Plan => "Building study plan",
        }
    }
}

impl std::fmt::Display for RunStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
