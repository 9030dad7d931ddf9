//! Query value objects
//!
//! [`Query`] is the validated raw user input. [`QueryEnvelope`] is the
//! immutable snapshot produced by the analyzer stage: the original query,
//! the rewritten retrieval-ready query, and a bounded conversation summary.
//! Later stages never mutate an envelope; a revised query means a new one.

use serde::{Deserialize, Serialize};

use crate::core::error::DomainError;

/// A non-empty user query (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    content: String,
}

impl Query {
    /// Try to create a query, rejecting empty or whitespace-only input.
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptyQuery);
        }
        Ok(Self { content })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Query {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Query::try_new(s)
    }
}

/// Immutable snapshot produced once per run by the analyzer stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEnvelope {
    /// The user's query as typed
    pub original: String,
    /// Rewritten, self-contained query optimized for routing and retrieval
    pub rewritten: String,
    /// Bounded digest of the prior conversation (may be empty)
    pub summary: String,
}

impl QueryEnvelope {
    pub fn new(
        original: impl Into<String>,
        rewritten: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            original: original.into(),
            rewritten: rewritten.into(),
            summary: summary.into(),
        }
    }

    /// Best-effort envelope used once the clarification cap is reached:
    /// the raw query stands in for the rewritten one.
    pub fn best_effort(original: impl Into<String>, summary: impl Into<String>) -> Self {
        let original = original.into();
        Self {
            rewritten: original.clone(),
            original,
            summary: summary.into(),
        }
    }

    /// The query downstream stages should route and retrieve with.
    pub fn retrieval_query(&self) -> &str {
        if self.rewritten.trim().is_empty() {
            &self.original
        } else {
            &self.rewritten
        }
    }
}

/// Non-error control signal: the analyzer needs more information from the
/// user before the run can proceed. Terminal for the current turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClarificationRequest {
    pub message: String,
}

impl ClarificationRequest {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "I need more information to understand your question.".to_string()
        } else {
            message
        };
        Self { message }
    }
}

/// Structured analyzer output extracted from model text
#[derive(Debug, Clone, Deserialize)]
pub struct QueryAnalysis {
    /// Whether the query has a resolvable subject and scope
    pub is_clear: bool,
    /// Self-contained rewrite of the query (empty when unclear)
    #[serde(default, alias = "rewritten")]
    pub rewritten_query: String,
    /// Explanation of what is missing, when unclear
    #[serde(default)]
    pub clarification_needed: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_rejects_empty() {
        assert!(Query::try_new("").is_err());
        assert!(Query::try_new("   ").is_err());
        assert!(Query::try_new("What is Rust?").is_ok());
    }

    #[test]
    fn test_envelope_retrieval_query_prefers_rewrite() {
        let envelope = QueryEnvelope::new("tell me about rust", "Rust programming language", "");
        assert_eq!(envelope.retrieval_query(), "Rust programming language");
    }

    #[test]
    fn test_envelope_retrieval_query_falls_back_to_original() {
        let envelope = QueryEnvelope::new("quantum error correction", "  ", "");
        assert_eq!(envelope.retrieval_query(), "quantum error correction");
    }

    #[test]
    fn test_best_effort_uses_raw_query() {
        let envelope = QueryEnvelope::best_effort("more on that", "summary");
        assert_eq!(envelope.original, envelope.rewritten);
        assert_eq!(envelope.summary, "summary");
    }

    #[test]
    fn test_clarification_default_message() {
        let req = ClarificationRequest::new("  ");
        assert!(req.message.contains("more information"));
    }
}
