//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("Unknown source kind: {0}")]
    UnknownSource(String),

    #[error("Intent decision must select at least one agent")]
    EmptyDecision,

    #[error("No JSON object found in model output")]
    MissingJson,

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DomainError::UnknownSource("wiki".to_string());
        assert_eq!(error.to_string(), "Unknown source kind: wiki");
    }

    #[test]
    fn test_empty_decision_display() {
        assert_eq!(
            DomainError::EmptyDecision.to_string(),
            "Intent decision must select at least one agent"
        );
    }
}
