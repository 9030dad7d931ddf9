//! Research configuration container.
//!
//! [`ResearchConfig`] groups the run parameters with session-level
//! behavior flags. Use cases receive only the slices they need; the
//! entry points hold the full container and build use-case inputs from
//! it. There is no ambient global state — everything an orchestration
//! run needs is threaded in explicitly from here.

use crate::config::RunParams;
use crate::use_cases::run_research::RunResearchInput;
use research_domain::{ConversationState, Query};

/// Configuration container for research sessions.
#[derive(Debug, Clone, Default)]
pub struct ResearchConfig {
    params: RunParams,
    /// Derive a study plan after each completed run.
    create_plan: bool,
}

impl ResearchConfig {
    pub fn new(params: RunParams) -> Self {
        Self {
            params,
            create_plan: false,
        }
    }

    // ==================== Accessors ====================

    pub fn params(&self) -> &RunParams {
        &self.params
    }

    pub fn create_plan(&self) -> bool {
        self.create_plan
    }

    // ==================== Builder Methods ====================

    pub fn with_plan(mut self, create_plan: bool) -> Self {
        self.create_plan = create_plan;
        self
    }

    pub fn with_params(mut self, params: RunParams) -> Self {
        self.params = params;
        self
    }

    // ==================== Use Case Input Factories ====================

    /// Build a [`RunResearchInput`] for a fresh run of `query` against
    /// `conversation`.
    pub fn to_run_input(&self, query: Query, conversation: ConversationState) -> RunResearchInput {
        RunResearchInput {
            query,
            conversation,
            want_plan: self.create_plan,
            clarification_round: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_plan() {
        let config = ResearchConfig::default();
        assert!(!config.create_plan());
        assert_eq!(config.params().max_clarification_rounds, 3);
    }

    #[test]
    fn test_to_run_input() {
        let config = ResearchConfig::default().with_plan(true);
        let query = Query::try_new("What is Rust?").unwrap();
        let input = config.to_run_input(query, ConversationState::new());

        assert_eq!(input.query.content(), "What is Rust?");
        assert!(input.want_plan);
        assert_eq!(input.clarification_round, 0);
    }
}
