//! Study plan value objects
//!
//! A [`StudyPlan`] is derived from an [`AggregatedResponse`](crate::response::AggregatedResponse)
//! by the optional transformer stage: ordered phases, each with short
//! learning objectives and the citations most relevant to it. Citation
//! reuse across phases is permitted. The plan's lifecycle ends once it is
//! handed to the publishing collaborator.

use crate::citation::Citation;
use serde::{Deserialize, Serialize};

/// One learning phase of a study plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyPhase {
    pub name: String,
    /// Short learning-goal statements
    pub objectives: Vec<String>,
    /// Citations supporting this phase
    pub resources: Vec<Citation>,
}

impl StudyPhase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objectives: Vec::new(),
            resources: Vec::new(),
        }
    }

    pub fn with_objectives(mut self, objectives: Vec<String>) -> Self {
        self.objectives = objectives;
        self
    }

    pub fn with_resources(mut self, resources: Vec<Citation>) -> Self {
        self.resources = resources;
        self
    }
}

/// Structured, phased learning artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyPlan {
    pub title: String,
    /// One-paragraph summary of what the plan covers
    #[serde(default)]
    pub overview: String,
    /// Ordered learning phases
    pub phases: Vec<StudyPhase>,
    /// Suggested follow-ups after the phases are complete
    #[serde(default)]
    pub next_steps: Vec<String>,
}

impl StudyPlan {
    pub fn new(title: impl Into<String>, phases: Vec<StudyPhase>) -> Self {
        Self {
            title: title.into(),
            overview: String::new(),
            phases,
            next_steps: Vec::new(),
        }
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = overview.into();
        self
    }

    pub fn with_next_steps(mut self, next_steps: Vec<String>) -> Self {
        self.next_steps = next_steps;
        self
    }

    /// Build a plan from a model-produced outline, resolving 1-based
    /// resource indexes against the run's citation list. Out-of-range
    /// indexes are skipped; a phase that names no valid resources gets
    /// none (citation reuse across phases is allowed).
    pub fn from_outline(outline: PlanOutline, citations: &[Citation]) -> Self {
        let phases = outline
            .phases
            .into_iter()
            .map(|phase| {
                let resources = phase
                    .resources
                    .iter()
                    .filter_map(|&i| i.checked_sub(1).and_then(|i| citations.get(i)))
                    .cloned()
                    .collect();
                StudyPhase {
                    name: phase.name,
                    objectives: phase.objectives,
                    resources,
                }
            })
            .collect();

        Self {
            title: outline.title,
            overview: outline.overview,
            phases,
            next_steps: outline.next_steps,
        }
    }
}

/// Raw transformer output extracted from model text. Resources are
/// 1-based indexes into the citation list the model was shown.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanOutline {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub phases: Vec<PhaseOutline>,
    #[serde(default)]
    pub next_steps: Vec<String>,
}

/// One phase of a [`PlanOutline`]
#[derive(Debug, Clone, Deserialize)]
pub struct PhaseOutline {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub resources: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceKind;

    fn citations() -> Vec<Citation> {
        vec![
            Citation::new(SourceKind::Academic, "paper", "https://arxiv.org/abs/1", ""),
            Citation::new(SourceKind::Web, "article", "https://example.com", ""),
            Citation::new(SourceKind::Code, "repo", "https://github.com/x/y", ""),
        ]
    }

    #[test]
    fn test_from_outline_resolves_indexes() {
        let outline = PlanOutline {
            title: "Plan".to_string(),
            overview: "Overview".to_string(),
            phases: vec![
                PhaseOutline {
                    name: "Foundations".to_string(),
                    objectives: vec!["read the paper".to_string()],
                    resources: vec![1, 2],
                },
                PhaseOutline {
                    name: "Practice".to_string(),
                    objectives: vec![],
                    resources: vec![3],
                },
            ],
            next_steps: vec!["build something".to_string()],
        };

        let plan = StudyPlan::from_outline(outline, &citations());
        assert_eq!(plan.phases.len(), 2);
        assert_eq!(plan.phases[0].resources.len(), 2);
        assert_eq!(plan.phases[1].resources[0].title, "repo");
        assert_eq!(plan.next_steps.len(), 1);
    }

    #[test]
    fn test_from_outline_skips_invalid_indexes() {
        let outline = PlanOutline {
            title: "Plan".to_string(),
            overview: String::new(),
            phases: vec![PhaseOutline {
                name: "Phase".to_string(),
                objectives: vec![],
                resources: vec![0, 2, 99],
            }],
            next_steps: vec![],
        };

        let plan = StudyPlan::from_outline(outline, &citations());
        assert_eq!(plan.phases[0].resources.len(), 1);
        assert_eq!(plan.phases[0].resources[0].title, "article");
    }

    #[test]
    fn test_citation_reuse_across_phases() {
        let outline = PlanOutline {
            title: "Plan".to_string(),
            overview: String::new(),
            phases: vec![
                PhaseOutline {
                    name: "A".to_string(),
                    objectives: vec![],
                    resources: vec![1],
                },
                PhaseOutline {
                    name: "B".to_string(),
                    objectives: vec![],
                    resources: vec![1],
                },
            ],
            next_steps: vec![],
        };

        let plan = StudyPlan::from_outline(outline, &citations());
        assert_eq!(plan.phases[0].resources, plan.phases[1].resources);
    }
}
