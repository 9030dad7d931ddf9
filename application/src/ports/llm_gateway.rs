//! LLM gateway port
//!
//! Defines the reasoning interface used by the analyzer, classifier,
//! aggregator, and study-plan transformer: text in, text out. Structured
//! output is extracted from the returned text by the domain parsers, so
//! the gateway stays provider-agnostic.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The reasoning backend cannot be reached or refuses service.
    #[error("Reasoning backend unavailable: {0}")]
    Unavailable(String),

    #[error("Rate limited by reasoning backend")]
    RateLimited,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,
}

impl GatewayError {
    /// Whether the failure means the backend is down rather than a
    /// per-request problem.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, GatewayError::Unavailable(_))
    }
}

/// Gateway for LLM reasoning calls
///
/// This port defines how the pipeline reaches its reasoning backend.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send a system + user prompt pair and return the completion text.
    async fn complete(&self, system: &str, user: &str) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_classification() {
        assert!(GatewayError::Unavailable("503".into()).is_unavailable());
        assert!(!GatewayError::RateLimited.is_unavailable());
        assert!(!GatewayError::Timeout.is_unavailable());
    }
}
