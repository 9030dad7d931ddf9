//! Infrastructure layer for copilot-research
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: configuration file loading, the HTTP reasoning
//! gateway, the source-specific retrieval agents, the study-plan
//! publisher, and the JSONL run logger.

pub mod agents;
pub mod config;
pub mod gateway;
pub mod logging;
pub mod publisher;

// Re-export commonly used types
pub use agents::{
    AcademicSearchAgent, CachedAgent, CodeSearchAgent, LocalDocsAgent, VideoSearchAgent,
    WebSearchAgent, build_agent_registry,
};
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentsConfig, FileConfig, FileGatewayConfig,
    FileRunConfig,
};
pub use gateway::OpenAiCompatGateway;
pub use logging::JsonlRunLogger;
pub use publisher::MarkdownPlanPublisher;
