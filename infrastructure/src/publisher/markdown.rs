//! Markdown file publisher.
//!
//! Renders a study plan into a hierarchical markdown document and writes
//! it into the configured output directory, one file per plan. This is
//! the shipped implementation of the publishing port; swapping in a
//! hosted-page publisher only means implementing the same trait.

use async_trait::async_trait;
use chrono::Utc;
use research_application::{PlanPublisher, PublishError, PublishedPlan};
use research_domain::StudyPlan;
use std::path::PathBuf;
use tracing::info;

/// Publisher that writes plans as markdown files
pub struct MarkdownPlanPublisher {
    out_dir: PathBuf,
}

impl MarkdownPlanPublisher {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

#[async_trait]
impl PlanPublisher for MarkdownPlanPublisher {
    async fn publish(&self, plan: &StudyPlan) -> Result<PublishedPlan, PublishError> {
        let filename = format!(
            "{}-{}.md",
            Utc::now().format("%Y%m%d-%H%M%S"),
            slugify(&plan.title)
        );
        let path = self.out_dir.join(filename);

        tokio::fs::create_dir_all(&self.out_dir)
            .await
            .map_err(|e| PublishError::WriteFailed(e.to_string()))?;
        tokio::fs::write(&path, render_markdown(plan))
            .await
            .map_err(|e| PublishError::WriteFailed(e.to_string()))?;

        info!(path = %path.display(), "Study plan published");
        Ok(PublishedPlan {
            location: path.display().to_string(),
        })
    }
}

/// Render the plan as a hierarchical markdown document.
fn render_markdown(plan: &StudyPlan) -> String {
    let mut out = format!("# {}\n", plan.title);

    if !plan.overview.trim().is_empty() {
        out.push_str(&format!("\n{}\n", plan.overview.trim()));
    }

    for (i, phase) in plan.phases.iter().enumerate() {
        out.push_str(&format!("\n## Phase {}: {}\n", i + 1, phase.name));

        if !phase.objectives.is_empty() {
            out.push_str("\n### Objectives\n\n");
            for objective in &phase.objectives {
                out.push_str(&format!("- [ ] {objective}\n"));
            }
        }

        if !phase.resources.is_empty() {
            out.push_str("\n### Resources\n\n");
            for resource in &phase.resources {
                if resource.snippet.trim().is_empty() {
                    out.push_str(&format!("- [{}]({})\n", resource.title, resource.url));
                } else {
                    out.push_str(&format!(
                        "- [{}]({}) — {}\n",
                        resource.title,
                        resource.url,
                        resource.snippet.trim()
                    ));
                }
            }
        }
    }

    if !plan.next_steps.is_empty() {
        out.push_str("\n## Next Steps\n\n");
        for step in &plan.next_steps {
            out.push_str(&format!("- {step}\n"));
        }
    }

    out
}

/// File-name-safe slug from a plan title.
fn slugify(title: &str) -> String {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug.trim_matches('-').to_string();
    let mut collapsed = String::with_capacity(slug.len());
    for c in slug.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed.chars().take(60).collect()
}
