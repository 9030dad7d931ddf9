//! Build Study Plan use case
//!
//! Optional final stage: derive an ordered, phased learning plan from an
//! aggregated response. Pure function of its input — the response is
//! never modified, and a failure here leaves the already-produced answer
//! untouched.
//!
//! The model is asked for a JSON outline referencing citations by number.
//! If the outline cannot be parsed, a deterministic fallback clusters the
//! citations by source family instead, so only reasoning-backend
//! unavailability (or a response with nothing to plan from) surfaces as
//! [`TransformError`].

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use research_domain::{
    AggregatedResponse, Citation, PromptTemplate, SourceKind, StudyPhase, StudyPlan,
    parse_plan_response,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors confined to the study-plan stage
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Plan reasoning unavailable: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Could not decompose the result into phases: {0}")]
    Undecomposable(String),
}

/// Use case for deriving a study plan from an aggregated response
pub struct BuildStudyPlanUseCase<G: LlmGateway> {
    gateway: Arc<G>,
}

impl<G: LlmGateway> BuildStudyPlanUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, response: &AggregatedResponse) -> Result<StudyPlan, TransformError> {
        if response.failed_overall {
            return Err(TransformError::Undecomposable(
                "the aggregated response has no usable sources".to_string(),
            ));
        }

        let prompt =
            PromptTemplate::study_plan(&response.query, &response.answer, &response.citations);
        let text = self
            .gateway
            .complete(PromptTemplate::plan_system(), &prompt)
            .await?;

        let plan = match parse_plan_response(&text) {
            Ok(outline) if !outline.phases.is_empty() => {
                let mut plan = StudyPlan::from_outline(outline, &response.citations);
                if plan.title.trim().is_empty() {
                    plan.title = format!("Study Plan: {}", response.query);
                }
                plan
            }
            Ok(_) | Err(_) => {
                debug!("Plan outline unusable, clustering citations by source");
                source_clustered_plan(response).ok_or_else(|| {
                    TransformError::Undecomposable(
                        "no citations to build phases from".to_string(),
                    )
                })?
            }
        };

        info!(phases = plan.phases.len(), "Built study plan");
        Ok(plan)
    }
}

/// Deterministic fallback: one phase per source family present in the
/// citation set, in canonical order.
fn source_clustered_plan(response: &AggregatedResponse) -> Option<StudyPlan> {
    let mut phases = Vec::new();
    for kind in SourceKind::ALL {
        let resources: Vec<Citation> = response
            .citations
            .iter()
            .filter(|c| c.source_type == kind)
            .cloned()
            .collect();
        if resources.is_empty() {
            continue;
        }
        phases.push(
            StudyPhase::new(cluster_phase_name(kind))
                .with_objectives(vec![cluster_objective(kind).to_string()])
                .with_resources(resources),
        );
    }

    if phases.is_empty() {
        return None;
    }

    let overview = response
        .answer
        .split("\n\n")
        .next()
        .unwrap_or_default()
        .chars()
        .take(500)
        .collect::<String>();

    Some(
        StudyPlan::new(format!("Study Plan: {}", response.query), phases)
            .with_overview(overview),
    )
}

fn cluster_phase_name(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Local => "Review your indexed material",
        SourceKind::Academic => "Read the research",
        SourceKind::Web => "Survey the articles",
        SourceKind::Code => "Study the implementations",
        SourceKind::Video => "Watch the tutorials",
    }
}

fn cluster_objective(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Local => "I can relate the new material to my own documents",
        SourceKind::Academic => "I can explain the key papers without notes",
        SourceKind::Web => "I can summarize the key concepts from the articles",
        SourceKind::Code => "I can understand and modify the implementations",
        SourceKind::Video => "I can apply the concepts from the tutorials",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::MockGateway;
    use research_domain::AgentStatus;
    use std::collections::BTreeMap;

    fn response_with_citations(citations: Vec<Citation>) -> AggregatedResponse {
        let mut statuses = BTreeMap::new();
        statuses.insert(SourceKind::Web, AgentStatus::Ok);
        AggregatedResponse::new("topic", "the synthesized answer", citations, statuses)
    }

    fn six_citations_in_two_clusters() -> Vec<Citation> {
        vec![
            Citation::new(SourceKind::Academic, "p1", "https://arxiv.org/abs/1", ""),
            Citation::new(SourceKind::Academic, "p2", "https://arxiv.org/abs/2", ""),
            Citation::new(SourceKind::Academic, "p3", "https://arxiv.org/abs/3", ""),
            Citation::new(SourceKind::Code, "r1", "https://github.com/a/1", ""),
            Citation::new(SourceKind::Code, "r2", "https://github.com/a/2", ""),
            Citation::new(SourceKind::Code, "r3", "https://github.com/a/3", ""),
        ]
    }

    #[tokio::test]
    async fn test_outline_resolves_to_clustered_phases() {
        // Two topical clusters in, two phases out, each phase drawing
        // only from its own cluster.
        let gateway = Arc::new(MockGateway::with_responses(vec![Ok(r#"{
            "title": "Study Plan: topic",
            "overview": "theory then practice",
            "phases": [
                {"name": "Theory", "objectives": ["I can explain the papers"], "resources": [1, 2, 3]},
                {"name": "Practice", "objectives": ["I can modify the code"], "resources": [4, 5, 6]}
            ],
            "next_steps": ["build a prototype"]
        }"#
        .to_string())]));
        let use_case = BuildStudyPlanUseCase::new(gateway);
        let response = response_with_citations(six_citations_in_two_clusters());

        let plan = use_case.execute(&response).await.unwrap();
        assert!(plan.phases.len() >= 2);
        assert!(
            plan.phases[0]
                .resources
                .iter()
                .all(|c| c.source_type == SourceKind::Academic)
        );
        assert!(
            plan.phases[1]
                .resources
                .iter()
                .all(|c| c.source_type == SourceKind::Code)
        );
    }

    #[tokio::test]
    async fn test_unparsable_outline_falls_back_to_source_clusters() {
        let gateway = Arc::new(MockGateway::with_responses(vec![Ok(
            "Here is a plan in prose, not JSON.".to_string(),
        )]));
        let use_case = BuildStudyPlanUseCase::new(gateway);
        let response = response_with_citations(six_citations_in_two_clusters());

        let plan = use_case.execute(&response).await.unwrap();
        assert_eq!(plan.phases.len(), 2);
        assert_eq!(plan.phases[0].resources.len(), 3);
        assert_eq!(plan.phases[1].resources.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_response_is_undecomposable() {
        let mut statuses = BTreeMap::new();
        statuses.insert(SourceKind::Web, AgentStatus::Failed);
        let response = AggregatedResponse::all_sources_failed("topic", statuses);

        let gateway = Arc::new(MockGateway::unavailable());
        let use_case = BuildStudyPlanUseCase::new(gateway);

        let result = use_case.execute(&response).await;
        assert!(matches!(result, Err(TransformError::Undecomposable(_))));
    }

    #[tokio::test]
    async fn test_gateway_failure_propagates() {
        let gateway = Arc::new(MockGateway::unavailable());
        let use_case = BuildStudyPlanUseCase::new(gateway);
        let response = response_with_citations(six_citations_in_two_clusters());

        let result = use_case.execute(&response).await;
        assert!(matches!(result, Err(TransformError::Gateway(_))));
    }

    #[tokio::test]
    async fn test_no_citations_and_no_outline_errors() {
        let gateway = Arc::new(MockGateway::with_responses(vec![Ok(
            "no json".to_string(),
        )]));
        let use_case = BuildStudyPlanUseCase::new(gateway);
        let response = response_with_citations(vec![]);

        let result = use_case.execute(&response).await;
        assert!(matches!(result, Err(TransformError::Undecomposable(_))));
    }
}
