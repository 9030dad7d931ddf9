//! Classify Intent use case
//!
//! Maps a query envelope to the subset of available agents worth
//! invoking, each with a sub-query tailored to its retrieval semantics.
//! The classifier's model output is validated into a typed
//! [`IntentDecision`] before any control flow depends on it; a selection
//! that filters down to nothing resolves to the default fallback set here,
//! while a failed classification surfaces as [`ClassifyError`] for the
//! caller to map to the same fallback.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use research_domain::{
    DomainError, IntentDecision, PromptTemplate, QueryEnvelope, SourceKind,
    parse_intent_response,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during intent classification
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Classification reasoning failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Classifier output could not be parsed: {0}")]
    Malformed(#[from] DomainError),
}

/// Use case for routing a query to retrieval agents
pub struct ClassifyIntentUseCase<G: LlmGateway> {
    gateway: Arc<G>,
}

impl<G: LlmGateway> ClassifyIntentUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Classify the envelope against the available agents.
    ///
    /// The returned decision is never empty: an empty or fully filtered
    /// selection resolves to [`IntentDecision::fallback`].
    pub async fn execute(
        &self,
        envelope: &QueryEnvelope,
        available: &[SourceKind],
    ) -> Result<IntentDecision, ClassifyError> {
        let query = envelope.retrieval_query();
        let prompt = PromptTemplate::intent_classification(query, &envelope.summary, available);

        let response = self
            .gateway
            .complete(PromptTemplate::intent_system(), &prompt)
            .await?;
        let selection = parse_intent_response(&response)?;

        match IntentDecision::from_selection(&selection, available, query) {
            Some(decision) => {
                info!(
                    agents = %decision
                        .agents()
                        .map(|a| a.as_str())
                        .collect::<Vec<_>>()
                        .join(","),
                    confidence = selection.confidence,
                    "Classified research intent"
                );
                Ok(decision)
            }
            None => {
                warn!(
                    selected = ?selection.agents,
                    "Classifier selected no usable agents, using fallback set"
                );
                Ok(IntentDecision::fallback(available, query))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::MockGateway;

    fn envelope(query: &str) -> QueryEnvelope {
        QueryEnvelope::new(query, query, "")
    }

    #[tokio::test]
    async fn test_selection_becomes_decision() {
        let gateway = Arc::new(MockGateway::with_responses(vec![Ok(r#"{
            "agents": ["academic", "code"],
            "reasoning": "papers and implementations",
            "confidence": 0.9,
            "sub_queries": {"code": "attention implementation"}
        }"#
        .to_string())]));
        let use_case = ClassifyIntentUseCase::new(gateway);

        let decision = use_case
            .execute(&envelope("attention mechanisms"), &SourceKind::ALL)
            .await
            .unwrap();

        let agents: Vec<_> = decision.agents().collect();
        assert_eq!(agents, vec![SourceKind::Academic, SourceKind::Code]);
        assert_eq!(
            decision.sub_query(SourceKind::Code),
            Some("attention implementation")
        );
        assert_eq!(
            decision.sub_query(SourceKind::Academic),
            Some("attention mechanisms")
        );
    }

    #[tokio::test]
    async fn test_empty_selection_falls_back() {
        // Invariant: the decision key set is never empty.
        let gateway = Arc::new(MockGateway::with_responses(vec![Ok(
            r#"{"agents": [], "reasoning": "nothing fits", "confidence": 0.2}"#.to_string(),
        )]));
        let use_case = ClassifyIntentUseCase::new(gateway);

        let decision = use_case
            .execute(&envelope("anything"), &SourceKind::ALL)
            .await
            .unwrap();
        assert!(!decision.is_empty());
        assert!(decision.contains(SourceKind::Web));
        assert!(decision.contains(SourceKind::Local));
    }

    #[tokio::test]
    async fn test_unknown_agents_filtered_then_fallback() {
        let gateway = Arc::new(MockGateway::with_responses(vec![Ok(
            r#"{"agents": ["wiki", "newsgroups"], "confidence": 0.7}"#.to_string(),
        )]));
        let use_case = ClassifyIntentUseCase::new(gateway);

        let decision = use_case
            .execute(&envelope("anything"), &[SourceKind::Web])
            .await
            .unwrap();
        let agents: Vec<_> = decision.agents().collect();
        assert_eq!(agents, vec![SourceKind::Web]);
    }

    #[tokio::test]
    async fn test_gateway_failure_is_an_error() {
        // The caller maps this to the fallback decision.
        let gateway = Arc::new(MockGateway::unavailable());
        let use_case = ClassifyIntentUseCase::new(gateway);

        let result = use_case.execute(&envelope("q"), &SourceKind::ALL).await;
        assert!(matches!(result, Err(ClassifyError::Gateway(_))));
    }

    #[tokio::test]
    async fn test_malformed_output_is_an_error() {
        let gateway = Arc::new(MockGateway::with_responses(vec![Ok(
            "I think web would be best".to_string(),
        )]));
        let use_case = ClassifyIntentUseCase::new(gateway);

        let result = use_case.execute(&envelope("q"), &SourceKind::ALL).await;
        assert!(matches!(result, Err(ClassifyError::Malformed(_))));
    }
}
