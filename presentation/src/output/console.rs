//! Console output formatting for research results

use colored::Colorize;
use research_domain::{AgentStatus, AggregatedResponse, StudyPlan};

/// Formats research results for terminal output
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Full output: answer, sources, and per-agent statuses.
    pub fn format(response: &AggregatedResponse) -> String {
        let mut out = String::new();

        if response.failed_overall {
            out.push_str(&format!("{}\n", "No sources available".red().bold()));
        }
        out.push_str(&response.answer);
        out.push('\n');

        if !response.citations.is_empty() {
            out.push_str(&format!("\n{}\n", "Sources".bold().underline()));
            for (i, citation) in response.citations.iter().enumerate() {
                out.push_str(&format!(
                    "  [{}] {} {}\n      {}\n",
                    i + 1,
                    citation.title.bold(),
                    format!("({})", citation.source_type).dimmed(),
                    citation.url.blue()
                ));
            }
        }

        out.push_str(&format!("\n{}\n", "Agents".bold().underline()));
        for (kind, status) in &response.agent_statuses {
            let marker = match status {
                AgentStatus::Ok => "v".green(),
                AgentStatus::Partial => "~".yellow(),
                AgentStatus::Failed => "x".red(),
            };
            out.push_str(&format!("  {} {} ({})\n", marker, kind, status.as_str()));
        }

        let unavailable = response.unavailable_sources();
        if !unavailable.is_empty() && !response.failed_overall {
            let names = unavailable
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!(
                "\n{}\n",
                format!("Note: some sources were unavailable: {names}").yellow()
            ));
        }

        out
    }

    /// JSON output of the complete response.
    pub fn format_json(response: &AggregatedResponse) -> String {
        serde_json::to_string_pretty(response)
            .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }

    /// Only the synthesized answer (plus an unavailability note).
    pub fn format_answer_only(response: &AggregatedResponse) -> String {
        let unavailable = response.unavailable_sources();
        if unavailable.is_empty() || response.failed_overall {
            response.answer.clone()
        } else {
            let names = unavailable
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}\n\n(unavailable sources: {names})", response.answer)
        }
    }

    /// Terminal rendering of a derived study plan.
    pub fn format_plan(plan: &StudyPlan) -> String {
        let mut out = format!("{}\n", plan.title.bold().underline());

        if !plan.overview.trim().is_empty() {
            out.push_str(&format!("{}\n", plan.overview.trim()));
        }

        for (i, phase) in plan.phases.iter().enumerate() {
            out.push_str(&format!(
                "\n{} {}\n",
                format!("Phase {}:", i + 1).cyan().bold(),
                phase.name.bold()
            ));
            for objective in &phase.objectives {
                out.push_str(&format!("  - {objective}\n"));
            }
            for resource in &phase.resources {
                out.push_str(&format!(
                    "    {} {}\n",
                    resource.title,
                    format!("<{}>", resource.url).dimmed()
                ));
            }
        }

        if !plan.next_steps.is_empty() {
            out.push_str(&format!("\n{}\n", "Next steps".bold()));
            for step in &plan.next_steps {
                out.push_str(&format!("  - {step}\n"));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use research_domain::{Citation, SourceKind, StudyPhase};
    use std::collections::BTreeMap;

    fn response() -> AggregatedResponse {
        let mut statuses = BTreeMap::new();
        statuses.insert(SourceKind::Web, AgentStatus::Ok);
        statuses.insert(SourceKind::Academic, AgentStatus::Failed);
        AggregatedResponse::new(
            "query",
            "The synthesized answer [1].",
            vec![Citation::new(
                SourceKind::Web,
                "An article",
                "https://example.com",
                "snippet",
            )],
            statuses,
        )
    }

    #[test]
    fn test_format_lists_sources_and_statuses() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format(&response());
        assert!(output.contains("The synthesized answer [1]."));
        assert!(output.contains("[1] An article"));
        assert!(output.contains("academic (failed)"));
        assert!(output.contains("unavailable: academic"));
    }

    #[test]
    fn test_format_answer_only_notes_unavailable() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_answer_only(&response());
        assert!(output.starts_with("The synthesized answer"));
        assert!(output.contains("unavailable sources: academic"));
    }

    #[test]
    fn test_format_json_round_trips() {
        let output = ConsoleFormatter::format_json(&response());
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["answer"], "The synthesized answer [1].");
        assert_eq!(parsed["citations"][0]["url"], "https://example.com");
    }

    #[test]
    fn test_format_plan_shows_phases() {
        colored::control::set_override(false);
        let plan = StudyPlan::new(
            "Study Plan: X",
            vec![
                StudyPhase::new("Read").with_objectives(vec!["I can read".to_string()]),
                StudyPhase::new("Build"),
            ],
        );
        let output = ConsoleFormatter::format_plan(&plan);
        assert!(output.contains("Phase 1:"));
        assert!(output.contains("Read"));
        assert!(output.contains("Phase 2:"));
    }
}
