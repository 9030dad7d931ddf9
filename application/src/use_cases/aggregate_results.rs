//! Aggregate Results use case
//!
//! Synthesizes one coherent answer from all non-failed agent results and
//! merges their citations. The result mapping is treated as
//! order-independent input: iteration follows the deterministic agent
//! order, so dedup tie-breaking never depends on task completion order.
//!
//! When every agent failed there is nothing to synthesize from — the
//! response is flagged failed-overall with an explanatory text instead of
//! fabricating an answer, and no reasoning call is made. A reasoning
//! failure during synthesis is the one run-level error this stage can
//! produce, since without it no answer exists.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::ProgressNotifier;
use research_domain::response::status_map;
use research_domain::{
    AgentResult, AgentStatus, AggregatedResponse, Citation, PromptTemplate, QueryEnvelope,
    RunStage, SourceKind, dedupe_citations,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during aggregation
#[derive(Error, Debug)]
pub enum AggregateError {
    /// Synthesis itself could not run; no answer can be produced.
    #[error("Synthesis unavailable: {0}")]
    Gateway(#[from] GatewayError),
}

/// Use case for answer synthesis and citation merging
pub struct AggregateResultsUseCase<G: LlmGateway> {
    gateway: Arc<G>,
}

impl<G: LlmGateway> AggregateResultsUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(
        &self,
        envelope: &QueryEnvelope,
        results: &BTreeMap<SourceKind, AgentResult>,
        progress: &dyn ProgressNotifier,
    ) -> Result<AggregatedResponse, AggregateError> {
        progress.on_stage_start(RunStage::Aggregate, 1);

        let statuses = status_map(results);
        let usable: Vec<&AgentResult> = results.values().filter(|r| r.is_usable()).collect();

        if usable.is_empty() {
            warn!("All agents failed, returning failed-overall response");
            progress.on_stage_complete(RunStage::Aggregate);
            return Ok(AggregatedResponse::all_sources_failed(
                envelope.retrieval_query(),
                statuses,
            ));
        }

        let collected: Vec<Citation> = usable
            .iter()
            .flat_map(|r| r.citations.iter().cloned())
            .collect();
        let citations = dedupe_citations(&collected);

        let unavailable: Vec<SourceKind> = statuses
            .iter()
            .filter(|(_, s)| **s == AgentStatus::Failed)
            .map(|(k, _)| *k)
            .collect();

        let prompt = PromptTemplate::aggregation(
            envelope.retrieval_query(),
            &usable,
            &citations,
            &unavailable,
        );
        let answer = self
            .gateway
            .complete(PromptTemplate::aggregation_system(), &prompt)
            .await?;

        info!(
            sources = usable.len(),
            citations = citations.len(),
            "Synthesized aggregated response"
        );
        progress.on_stage_complete(RunStage::Aggregate);

        Ok(AggregatedResponse::new(
            envelope.retrieval_query(),
            answer,
            citations,
            statuses,
        ))
    }
}
