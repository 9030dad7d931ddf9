//! Prompt templates for the research pipeline
//!
//! Every reasoning call the pipeline makes is built here, so the wording
//! lives in one place and the use cases stay free of string assembly.
//! Templates that expect structured output spell out the exact JSON shape;
//! the matching parsers live in [`crate::parsing`].

use crate::citation::Citation;
use crate::conversation::{Role, Turn};
use crate::retrieval::AgentResult;
use crate::source::SourceKind;

/// How many trailing turns the summary prompt includes.
const SUMMARY_WINDOW: usize = 6;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for conversation summarization
    pub fn summary_system() -> &'static str {
        r#"You summarize conversations for a research assistant.
Produce 1-2 concise sentences covering the main topics, important entities,
and unresolved questions. Discard greetings, misunderstandings, and
off-topic content. If nothing meaningful was discussed, return an empty
string."#
    }

    /// User prompt for conversation summarization
    pub fn conversation_summary(turns: &[Turn]) -> String {
        let mut prompt = String::from("Conversation:\n");
        let start = turns.len().saturating_sub(SUMMARY_WINDOW);
        for turn in &turns[start..] {
            let role = match turn.role {
                Role::User => "User",
                Role::Assistant => "Assistant",
            };
            prompt.push_str(&format!("{}: {}\n", role, turn.text));
        }
        prompt.push_str("\nSummary:");
        prompt
    }

    /// System prompt for query analysis
    pub fn analysis_system() -> &'static str {
        r#"You rewrite user queries so they can be used for document retrieval.
The rewritten query must be clear and self-contained: resolve pronouns and
ellipsis against the conversation context, fix typos, and remove filler.
Use the context ONLY when it is needed to understand the query; never
reinterpret explicit terms or add constraints that were not asked for.
If the query has no resolvable subject or scope, mark it as unclear and
explain what is missing.

Respond with a JSON object:
{"is_clear": bool, "rewritten_query": string, "clarification_needed": string}"#
    }

    /// User prompt for query analysis
    pub fn query_analysis(query: &str, summary: &str) -> String {
        let context = if summary.trim().is_empty() {
            "Conversation context: none".to_string()
        } else {
            format!("Conversation context (use only if needed):\n{}", summary)
        };
        format!("User query:\n\"{}\"\n\n{}", query, context)
    }

    /// System prompt for intent classification
    pub fn intent_system() -> &'static str {
        r#"You are a research orchestrator that routes queries to specialized
retrieval agents. Select every agent that is relevant — it is better to
include an extra relevant source than to miss one. For queries about
current or recent developments, include both the academic and web agents
when available. For each selected agent you may provide a sub-query
tailored to that agent's retrieval semantics (e.g. repository search terms
for the code agent instead of natural-language prose).

Respond with a JSON object:
{"agents": [string], "reasoning": string, "confidence": number,
 "sub_queries": {agent: string}}"#
    }

    /// User prompt for intent classification
    pub fn intent_classification(
        query: &str,
        summary: &str,
        available: &[SourceKind],
    ) -> String {
        let mut prompt = String::from("Available agents:\n");
        for kind in available {
            prompt.push_str(&format!("- {}: {}\n", kind.as_str(), kind.description()));
        }
        prompt.push_str(&format!("\nQuery to route:\n\"{}\"\n", query));
        if !summary.trim().is_empty() {
            prompt.push_str(&format!(
                "\nConversation context (use only if relevant):\n{}\n",
                summary
            ));
        }
        prompt
    }

    /// System prompt for answer synthesis
    pub fn aggregation_system() -> &'static str {
        r#"You merge retrieved answers from different sources into one final
response. Use ONLY the content provided. Synthesize complementary
information, preserve source-specific details ("According to research
papers..." vs "Implementations show..."), keep temporal references from
the sources, and acknowledge conflicts between sources instead of hiding
them. Attribute claims to the numbered citations they come from using
[n] markers. Ignore answers that are empty or irrelevant. Do not invent
sources or mention your own reasoning process."#
    }

    /// User prompt for answer synthesis
    pub fn aggregation(
        query: &str,
        results: &[&AgentResult],
        citations: &[Citation],
        unavailable: &[SourceKind],
    ) -> String {
        let mut prompt = format!("Original question:\n{}\n", query);

        prompt.push_str("\nRetrieved answers:\n");
        for result in results {
            prompt.push_str(&format!(
                "\n--- {} ---\n{}\n",
                result.agent.as_str(),
                result.answer
            ));
        }

        if !citations.is_empty() {
            prompt.push_str("\nCitations:\n");
            for (i, citation) in citations.iter().enumerate() {
                prompt.push_str(&format!(
                    "[{}] {} ({}) — {}\n",
                    i + 1,
                    citation.title,
                    citation.url,
                    citation.snippet
                ));
            }
        }

        if !unavailable.is_empty() {
            let names = unavailable
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            prompt.push_str(&format!(
                "\nUnavailable sources (mention briefly that these could not be \
                 consulted): {}\n",
                names
            ));
        }

        prompt.push_str("\nWrite the final synthesized answer.");
        prompt
    }

    /// System prompt for study-plan derivation
    pub fn plan_system() -> &'static str {
        r#"You turn a research answer and its citations into a structured study
plan. Group the material into 2-5 ordered phases from fundamentals to
advanced topics. Each phase needs a short name, 1-3 learning objectives
phrased as outcomes ("I can ..."), and the citations most relevant to it,
referenced by their number. Citations may be reused across phases.

Respond with a JSON object:
{"title": string, "overview": string,
 "phases": [{"name": string, "objectives": [string], "resources": [number]}],
 "next_steps": [string]}"#
    }

    /// User prompt for study-plan derivation
    pub fn study_plan(query: &str, answer: &str, citations: &[Citation]) -> String {
        let mut prompt = format!(
            "Research question:\n{}\n\nSynthesized answer:\n{}\n\nCitations:\n",
            query, answer
        );
        for (i, citation) in citations.iter().enumerate() {
            prompt.push_str(&format!(
                "[{}] ({}) {} — {}\n",
                i + 1,
                citation.source_type.as_str(),
                citation.title,
                citation.url
            ));
        }
        prompt.push_str("\nProduce the study plan JSON.");
        prompt
    }
}
