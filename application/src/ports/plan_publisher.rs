//! Plan publisher port
//!
//! The study-plan transformer hands its output to an external publishing
//! collaborator that creates a persistent artifact (a hierarchical page
//! or document) in some external system. The pipeline only needs this
//! contract; publish failures are surfaced to the caller unchanged.

use async_trait::async_trait;
use research_domain::StudyPlan;
use thiserror::Error;

/// Errors owned by the publishing collaborator
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Publish target rejected the plan: {0}")]
    Rejected(String),

    #[error("Publish target unreachable: {0}")]
    Unreachable(String),

    #[error("Failed to write artifact: {0}")]
    WriteFailed(String),
}

/// Where a published plan ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPlan {
    /// Locator of the created artifact (URL or path)
    pub location: String,
}

/// Publishing collaborator for completed study plans
#[async_trait]
pub trait PlanPublisher: Send + Sync {
    /// Create a persistent artifact from the plan.
    async fn publish(&self, plan: &StudyPlan) -> Result<PublishedPlan, PublishError>;
}
