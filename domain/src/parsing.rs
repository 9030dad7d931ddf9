//! Model output parsing
//!
//! These functions extract structured decisions from free-form LLM
//! responses. They are pure domain logic — no I/O, no session management.
//! Control flow in the pipeline branches only on the typed values produced
//! here, never on raw model text; anything that fails to parse surfaces as
//! a [`DomainError`] for the caller to map to its fallback.
//!
//! # Functions
//!
//! | Function | Produces | Consumed by |
//! |----------|----------|-------------|
//! | [`parse_analysis_response`] | [`QueryAnalysis`] | Query analyzer |
//! | [`parse_intent_response`] | [`IntentSelection`] | Intent classifier |
//! | [`parse_plan_response`] | [`PlanOutline`] | Study-plan transformer |

use crate::core::error::DomainError;
use crate::plan::PlanOutline;
use crate::query::QueryAnalysis;
use crate::routing::IntentSelection;

/// Extract the outermost JSON object from model text.
///
/// Models frequently wrap JSON in markdown fences or surround it with
/// prose; this takes the slice from the first `{` to the last `}`.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

fn parse_json<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, DomainError> {
    let json = extract_json_object(text).ok_or(DomainError::MissingJson)?;
    serde_json::from_str(json).map_err(|e| DomainError::MalformedOutput(e.to_string()))
}

/// Parse the analyzer's clarity decision and query rewrite.
pub fn parse_analysis_response(text: &str) -> Result<QueryAnalysis, DomainError> {
    parse_json(text)
}

/// Parse the classifier's agent selection.
pub fn parse_intent_response(text: &str) -> Result<IntentSelection, DomainError> {
    let mut selection: IntentSelection = parse_json(text)?;
    selection.confidence = selection.confidence.clamp(0.0, 1.0);
    Ok(selection)
}

/// Parse the transformer's plan outline.
pub fn parse_plan_response(text: &str) -> Result<PlanOutline, DomainError> {
    parse_json(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_object() {
        assert_eq!(extract_json_object(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_extract_from_fenced_block() {
        let text = "Here is my decision:\n```json\n{\"is_clear\": true}\n```\nDone.";
        assert_eq!(extract_json_object(text), Some("{\"is_clear\": true}"));
    }

    #[test]
    fn test_extract_missing_object() {
        assert!(extract_json_object("no json here").is_none());
        assert!(extract_json_object("} backwards {").is_none());
    }

    #[test]
    fn test_parse_analysis_clear() {
        let text = r#"{"is_clear": true, "rewritten_query": "Rust ownership model", "clarification_needed": ""}"#;
        let analysis = parse_analysis_response(text).unwrap();
        assert!(analysis.is_clear);
        assert_eq!(analysis.rewritten_query, "Rust ownership model");
    }

    #[test]
    fn test_parse_analysis_unclear_with_defaults() {
        let text = r#"{"is_clear": false, "clarification_needed": "Which project?"}"#;
        let analysis = parse_analysis_response(text).unwrap();
        assert!(!analysis.is_clear);
        assert!(analysis.rewritten_query.is_empty());
        assert_eq!(analysis.clarification_needed, "Which project?");
    }

    #[test]
    fn test_parse_analysis_malformed() {
        assert!(matches!(
            parse_analysis_response("not json"),
            Err(DomainError::MissingJson)
        ));
        assert!(matches!(
            parse_analysis_response(r#"{"is_clear": "maybe"}"#),
            Err(DomainError::MalformedOutput(_))
        ));
    }

    #[test]
    fn test_parse_intent_with_sub_queries() {
        let text = r#"```json
{
  "agents": ["academic", "code"],
  "reasoning": "paper plus implementation",
  "confidence": 0.85,
  "sub_queries": {"code": "attention mechanism implementation"}
}
```"#;
        let selection = parse_intent_response(text).unwrap();
        assert_eq!(selection.agents, vec!["academic", "code"]);
        assert_eq!(
            selection.sub_queries.get("code").map(String::as_str),
            Some("attention mechanism implementation")
        );
    }

    #[test]
    fn test_parse_intent_clamps_confidence() {
        let text = r#"{"agents": ["web"], "confidence": 7.0}"#;
        let selection = parse_intent_response(text).unwrap();
        assert_eq!(selection.confidence, 1.0);
    }

    #[test]
    fn test_parse_plan_outline() {
        let text = r#"{
  "title": "Study Plan: Transformers",
  "overview": "From fundamentals to implementation.",
  "phases": [
    {"name": "Foundations", "objectives": ["understand attention"], "resources": [1, 3]},
    {"name": "Practice", "objectives": ["implement a block"], "resources": [2]}
  ],
  "next_steps": ["train a small model"]
}"#;
        let outline = parse_plan_response(text).unwrap();
        assert_eq!(outline.phases.len(), 2);
        assert_eq!(outline.phases[0].resources, vec![1, 3]);
    }
}
