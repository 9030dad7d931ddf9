//! Analyze Query use case
//!
//! First pipeline stage: digest the prior conversation, rewrite the query
//! into a self-contained retrieval form, and decide whether the run can
//! proceed or must pause for clarification. Clarification is a control
//! signal, not an error — the caller surfaces it to the user and re-enters
//! analysis with the follow-up appended to the conversation.
//!
//! Degradation: the summary is best-effort (a failed summary call just
//! yields an empty digest), and both unreachable reasoning and unparsable
//! analyzer output fall back to a best-effort envelope so a flaky backend
//! never wedges the run in the analysis stage.

use crate::config::RunParams;
use crate::ports::llm_gateway::LlmGateway;
use research_domain::{
    ClarificationRequest, ConversationState, PromptTemplate, QueryEnvelope,
    parse_analysis_response,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during query analysis
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Conversation contains no user query")]
    MissingQuery,
}

/// Result of the analysis stage
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    /// The query is clear; proceed with this envelope.
    Proceed(QueryEnvelope),
    /// The query is ambiguous; ask the user and re-enter analysis.
    Clarify(ClarificationRequest),
}

/// Use case for conversation summarization and query rewriting
pub struct AnalyzeQueryUseCase<G: LlmGateway> {
    gateway: Arc<G>,
}

impl<G: LlmGateway> AnalyzeQueryUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Analyze the conversation's latest user query.
    ///
    /// `round` counts how many clarifications this turn has already been
    /// through; at `max_clarification_rounds` the analyzer stops asking
    /// and proceeds best-effort with the raw query.
    pub async fn execute(
        &self,
        conversation: &ConversationState,
        params: &RunParams,
        round: usize,
    ) -> Result<AnalysisOutcome, AnalyzeError> {
        let query = conversation
            .last_user_query()
            .ok_or(AnalyzeError::MissingQuery)?;

        let summary = self.summarize(conversation, params).await;

        let user_prompt = PromptTemplate::query_analysis(query, &summary);
        let response = match self
            .gateway
            .complete(PromptTemplate::analysis_system(), &user_prompt)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!("Query analysis unavailable ({}), proceeding best-effort", e);
                return Ok(AnalysisOutcome::Proceed(QueryEnvelope::best_effort(
                    query, summary,
                )));
            }
        };

        match parse_analysis_response(&response) {
            Ok(analysis) if analysis.is_clear => {
                let rewritten = if analysis.rewritten_query.trim().is_empty() {
                    query.to_string()
                } else {
                    analysis.rewritten_query
                };
                debug!(%rewritten, "Query is clear");
                Ok(AnalysisOutcome::Proceed(QueryEnvelope::new(
                    query, rewritten, summary,
                )))
            }
            Ok(analysis) => {
                if round >= params.max_clarification_rounds {
                    debug!(round, "Clarification cap reached, proceeding best-effort");
                    Ok(AnalysisOutcome::Proceed(QueryEnvelope::best_effort(
                        query, summary,
                    )))
                } else {
                    Ok(AnalysisOutcome::Clarify(ClarificationRequest::new(
                        analysis.clarification_needed,
                    )))
                }
            }
            Err(e) => {
                warn!("Unparsable analyzer output ({}), proceeding best-effort", e);
                Ok(AnalysisOutcome::Proceed(QueryEnvelope::best_effort(
                    query, summary,
                )))
            }
        }
    }

    /// Digest the prior turns into a bounded summary. Best-effort: short
    /// conversations and summary failures both yield an empty digest.
    async fn summarize(&self, conversation: &ConversationState, params: &RunParams) -> String {
        if !conversation.needs_summary(params.summary_min_turns) {
            return String::new();
        }
        let prior = conversation.prior_turns();
        if prior.is_empty() {
            return String::new();
        }

        let prompt = PromptTemplate::conversation_summary(prior);
        match self
            .gateway
            .complete(PromptTemplate::summary_system(), &prompt)
            .await
        {
            Ok(text) => truncate_chars(text.trim(), params.summary_max_chars),
            Err(e) => {
                debug!("Conversation summary unavailable: {}", e);
                String::new()
            }
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}
