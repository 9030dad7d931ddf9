//! Dispatch Agents use case
//!
//! Fans the intent decision out to every selected agent concurrently and
//! fans back in, tolerating partial failure. The guarantees the rest of
//! the pipeline relies on:
//!
//! - The returned mapping has exactly one entry per selected agent, no
//!   matter how many agents failed, timed out, or were never registered.
//! - A per-agent deadline (bounded by the remaining run budget) and the
//!   overall run deadline are both enforced here, so a hung adapter can
//!   neither block its siblings nor the run.
//! - When the overall deadline trips, outstanding invocations are
//!   cancelled; results that already completed are kept.

use crate::context::RunContext;
use crate::ports::progress::ProgressNotifier;
use crate::ports::retrieval_agent::AgentRegistry;
use research_domain::{AgentResult, IntentDecision, RunStage, SourceKind};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Use case for parallel retrieval fan-out
pub struct DispatchAgentsUseCase {
    registry: Arc<AgentRegistry>,
}

impl DispatchAgentsUseCase {
    pub fn new(registry: Arc<AgentRegistry>) -> Self {
        Self { registry }
    }

    /// Invoke every selected agent concurrently and collect one result
    /// per agent. Infallible: per-agent problems degrade to `Failed`
    /// entries in the mapping.
    pub async fn execute(
        &self,
        decision: &IntentDecision,
        ctx: &RunContext,
        progress: &dyn ProgressNotifier,
    ) -> BTreeMap<SourceKind, AgentResult> {
        progress.on_stage_start(RunStage::Retrieve, decision.len());

        let citation_cap = ctx.params().max_citations_per_agent;
        let mut results: BTreeMap<SourceKind, AgentResult> = BTreeMap::new();
        let mut join_set = JoinSet::new();

        for (kind, sub_query) in decision.iter() {
            let Some(agent) = self.registry.get(kind) else {
                warn!("No agent registered for source '{}'", kind);
                progress.on_agent_complete(RunStage::Retrieve, kind, false);
                results.insert(
                    kind,
                    AgentResult::failed(kind, "no agent registered for this source"),
                );
                continue;
            };

            let ctx = ctx.clone();
            let sub_query = sub_query.to_string();

            join_set.spawn(async move {
                let deadline = ctx.agent_deadline();
                debug!(agent = %kind, ?deadline, "Dispatching retrieval");
                let result = tokio::select! {
                    _ = ctx.cancellation().cancelled() => {
                        AgentResult::timed_out(kind, deadline)
                    }
                    outcome = tokio::time::timeout(
                        deadline,
                        agent.retrieve(&sub_query, &ctx, deadline),
                    ) => match outcome {
                        Ok(result) => result,
                        Err(_) => {
                            warn!("Agent '{}' exceeded its deadline", kind);
                            AgentResult::timed_out(kind, deadline)
                        }
                    }
                };
                (kind, result)
            });
        }

        let overall = ctx.remaining_budget();
        let collect = async {
            while let Some(joined) = join_set.join_next().await {
                match joined {
                    Ok((kind, mut result)) => {
                        result.truncate_citations(citation_cap);
                        progress.on_agent_complete(RunStage::Retrieve, kind, result.is_usable());
                        results.insert(kind, result);
                    }
                    Err(e) => {
                        // The slot is filled from the decision below.
                        warn!("Agent task join error: {}", e);
                    }
                }
            }
        };

        if tokio::time::timeout(overall, collect).await.is_err() {
            warn!("Run deadline exceeded, cancelling outstanding agents");
            ctx.cancellation().cancel();
            join_set.abort_all();
        }

        // One slot per selected agent, no matter what happened to it.
        for kind in decision.agents() {
            if !results.contains_key(&kind) {
                progress.on_agent_complete(RunStage::Retrieve, kind, false);
                results.insert(kind, AgentResult::timed_out(kind, overall));
            }
        }

        progress.on_stage_complete(RunStage::Retrieve);
        results
    }
}
