//! Application layer for copilot-research
//!
//! This crate contains the orchestration use cases, port definitions, and
//! application configuration. It depends only on the domain layer; every
//! external collaborator (LLM gateway, retrieval agents, publisher) is
//! reached through a port implemented in the infrastructure layer.

pub mod config;
pub mod context;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ResearchConfig, RunParams};
pub use context::RunContext;
pub use ports::{
    llm_gateway::{GatewayError, LlmGateway},
    plan_publisher::{PlanPublisher, PublishError, PublishedPlan},
    progress::{NoProgress, ProgressNotifier},
    retrieval_agent::{AgentRegistry, RetrievalAgent},
    run_logger::{NoRunLogger, RunLogger},
};
pub use use_cases::aggregate_results::{AggregateError, AggregateResultsUseCase};
pub use use_cases::analyze_query::{AnalysisOutcome, AnalyzeError, AnalyzeQueryUseCase};
pub use use_cases::build_study_plan::{BuildStudyPlanUseCase, TransformError};
pub use use_cases::classify_intent::{ClassifyError, ClassifyIntentUseCase};
pub use use_cases::dispatch_agents::DispatchAgentsUseCase;
pub use use_cases::run_research::{
    RunResearchError, RunResearchInput, RunResearchOutput, RunResearchUseCase, RunResult,
};
