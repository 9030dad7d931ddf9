//! Run Research use case
//!
//! The single external entry point of the orchestration core: takes a
//! user query plus the prior conversation, drives the pipeline through
//! its stages, and returns either a clarification request or an
//! aggregated response (with a study plan when requested).
//!
//! Propagation policy: everything below run level degrades in place —
//! classification failures fall back to the default agent set, agent
//! failures become failed slots, transform failures leave the response
//! untouched. Only synthesis unavailability escalates, because without
//! it there is no answer to return.

use crate::config::ResearchConfig;
use crate::context::RunContext;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::retrieval_agent::AgentRegistry;
use crate::ports::run_logger::{NoRunLogger, RunLogger};
use crate::use_cases::aggregate_results::{AggregateError, AggregateResultsUseCase};
use crate::use_cases::analyze_query::{AnalysisOutcome, AnalyzeError, AnalyzeQueryUseCase};
use crate::use_cases::build_study_plan::{BuildStudyPlanUseCase, TransformError};
use crate::use_cases::classify_intent::ClassifyIntentUseCase;
use crate::use_cases::dispatch_agents::DispatchAgentsUseCase;
use research_domain::{
    AggregatedResponse, ClarificationRequest, ConversationState, IntentDecision, Query, RunStage,
    StudyPlan,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Errors that abort a research run
#[derive(Error, Debug)]
pub enum RunResearchError {
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    #[error(transparent)]
    Aggregation(#[from] AggregateError),
}

/// Input for one research run
#[derive(Debug, Clone)]
pub struct RunResearchInput {
    /// The user's query for this turn
    pub query: Query,
    /// Prior conversation; owned by this run until it returns
    pub conversation: ConversationState,
    /// Derive a study plan from the aggregated response
    pub want_plan: bool,
    /// How many clarification rounds this turn has been through
    pub clarification_round: usize,
}

impl RunResearchInput {
    pub fn new(query: Query, conversation: ConversationState) -> Self {
        Self {
            query,
            conversation,
            want_plan: false,
            clarification_round: 0,
        }
    }

    pub fn with_plan(mut self) -> Self {
        self.want_plan = true;
        self
    }

    pub fn with_clarification_round(mut self, round: usize) -> Self {
        self.clarification_round = round;
        self
    }
}

/// What a run produced
#[derive(Debug)]
pub enum RunResult {
    /// The analyzer needs more information; re-enter with the follow-up.
    NeedsClarification(ClarificationRequest),
    /// The pipeline completed. The plan slot is present only when one was
    /// requested; its error never invalidates the response.
    Answered {
        response: AggregatedResponse,
        plan: Option<Result<StudyPlan, TransformError>>,
    },
}

/// Output of one research run
#[derive(Debug)]
pub struct RunResearchOutput {
    pub run_id: Uuid,
    /// The conversation with this run's turns appended
    pub conversation: ConversationState,
    pub result: RunResult,
}

/// Use case orchestrating the full research pipeline
pub struct RunResearchUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    registry: Arc<AgentRegistry>,
    config: ResearchConfig,
    logger: Arc<dyn RunLogger>,
}

impl<G: LlmGateway + 'static> RunResearchUseCase<G> {
    pub fn new(gateway: Arc<G>, registry: Arc<AgentRegistry>, config: ResearchConfig) -> Self {
        Self {
            gateway,
            registry,
            config,
            logger: Arc::new(NoRunLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn RunLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the run with default (no-op) progress.
    pub async fn execute(
        &self,
        input: RunResearchInput,
    ) -> Result<RunResearchOutput, RunResearchError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the run with progress callbacks.
    pub async fn execute_with_progress(
        &self,
        input: RunResearchInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<RunResearchOutput, RunResearchError> {
        let ctx = RunContext::new(self.config.params().clone());
        let run_id = ctx.run_id();
        let mut conversation = input.conversation;
        conversation.push_user(input.query.content());

        info!(%run_id, query = %input.query, "Starting research run");

        // Stage 1: analyze (may pause the run for clarification)
        progress.on_stage_start(RunStage::Analyze, 1);
        let analyzer = AnalyzeQueryUseCase::new(Arc::clone(&self.gateway));
        let outcome = analyzer
            .execute(&conversation, ctx.params(), input.clarification_round)
            .await?;
        progress.on_stage_complete(RunStage::Analyze);

        let envelope = match outcome {
            AnalysisOutcome::Clarify(request) => {
                self.logger.log_stage(
                    run_id,
                    RunStage::Analyze,
                    &json!({"outcome": "clarify", "message": request.message.clone()}),
                );
                progress.on_clarification(&request.message);
                conversation.push_assistant(request.message.clone());
                return Ok(RunResearchOutput {
                    run_id,
                    conversation,
                    result: RunResult::NeedsClarification(request),
                });
            }
            AnalysisOutcome::Proceed(envelope) => {
                self.logger.log_stage(
                    run_id,
                    RunStage::Analyze,
                    &json!({"outcome": "proceed", "rewritten": envelope.rewritten.clone()}),
                );
                envelope
            }
        };

        // Stage 2: classify (failure falls back to the default agent set)
        progress.on_stage_start(RunStage::Classify, 1);
        let available = self.registry.available();
        let classifier = ClassifyIntentUseCase::new(Arc::clone(&self.gateway));
        let decision = match classifier.execute(&envelope, &available).await {
            Ok(decision) => decision,
            Err(e) => {
                warn!("Classification failed ({}), using fallback agents", e);
                IntentDecision::fallback(&available, envelope.retrieval_query())
            }
        };
        progress.on_stage_complete(RunStage::Classify);
        self.logger.log_stage(
            run_id,
            RunStage::Classify,
            &json!({
                "agents": decision.agents().map(|a| a.as_str()).collect::<Vec<_>>(),
            }),
        );

        // Stage 3: parallel retrieval
        let dispatcher = DispatchAgentsUseCase::new(Arc::clone(&self.registry));
        let results = dispatcher.execute(&decision, &ctx, progress).await;
        self.logger.log_stage(
            run_id,
            RunStage::Retrieve,
            &json!({
                "statuses": results
                    .iter()
                    .map(|(k, r)| (k.as_str(), r.status.as_str()))
                    .collect::<Vec<_>>(),
            }),
        );

        // Stage 4: aggregate (synthesis unavailability aborts the run)
        let aggregator = AggregateResultsUseCase::new(Arc::clone(&self.gateway));
        let response = aggregator.execute(&envelope, &results, progress).await?;
        conversation.push_assistant(response.answer.clone());
        self.logger.log_stage(
            run_id,
            RunStage::Aggregate,
            &json!({"failed_overall": response.failed_overall,
                    "citations": response.citations.len()}),
        );

        // Stage 5 (optional): study plan
        let plan = if input.want_plan && !response.failed_overall {
            progress.on_stage_start(RunStage::Plan, 1);
            let transformer = BuildStudyPlanUseCase::new(Arc::clone(&self.gateway));
            let plan_result = transformer.execute(&response).await;
            progress.on_stage_complete(RunStage::Plan);
            self.logger.log_stage(
                run_id,
                RunStage::Plan,
                &json!({"ok": plan_result.is_ok()}),
            );
            Some(plan_result)
        } else {
            None
        };

        info!(%run_id, elapsed = ?ctx.elapsed(), "Research run complete");
        Ok(RunResearchOutput {
            run_id,
            conversation,
            result: RunResult::Answered { response, plan },
        })
    }
}
