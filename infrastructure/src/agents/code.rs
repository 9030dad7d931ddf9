//! Code retrieval agent — GitHub repository search.
//!
//! Searches the GitHub REST API for repositories matching the sub-query.
//! An optional token (read from the configured environment variable at
//! registry construction) raises the rate limits; without one the agent
//! still works within the anonymous quota, and a rate-limited response
//! degrades to a partial result.

use async_trait::async_trait;
use research_application::{RetrievalAgent, RunContext};
use research_domain::{AgentResult, Citation, SourceKind};
use std::time::Duration;
use tracing::debug;

const GITHUB_SEARCH_URL: &str = "https://api.github.com/search/repositories";

/// Repositories requested per query.
const MAX_RESULTS: usize = 10;

/// Code-host search agent backed by the GitHub REST API
pub struct CodeSearchAgent {
    client: reqwest::Client,
    token: Option<String>,
}

impl CodeSearchAgent {
    pub fn new(client: reqwest::Client, token: Option<String>) -> Self {
        Self { client, token }
    }
}

#[async_trait]
impl RetrievalAgent for CodeSearchAgent {
    fn kind(&self) -> SourceKind {
        SourceKind::Code
    }

    async fn retrieve(
        &self,
        sub_query: &str,
        _ctx: &RunContext,
        _deadline: Duration,
    ) -> AgentResult {
        let per_page = MAX_RESULTS.to_string();
        let mut request = self
            .client
            .get(GITHUB_SEARCH_URL)
            .query(&[
                ("q", sub_query),
                ("sort", "stars"),
                ("per_page", per_page.as_str()),
            ])
            .header("User-Agent", "copilot-research/0.4 (research agent)")
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                return AgentResult::failed(
                    SourceKind::Code,
                    format!("GitHub request failed: {e}"),
                );
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::FORBIDDEN
            || status == reqwest::StatusCode::TOO_MANY_REQUESTS
        {
            return AgentResult::partial(
                SourceKind::Code,
                String::new(),
                vec![],
                "GitHub rate limit exceeded",
            );
        }
        if !status.is_success() {
            return AgentResult::failed(SourceKind::Code, format!("GitHub returned {status}"));
        }

        let body: serde_json::Value = match response.json().await {
            Ok(j) => j,
            Err(e) => {
                return AgentResult::failed(
                    SourceKind::Code,
                    format!("failed to parse GitHub response: {e}"),
                );
            }
        };

        let citations = parse_repositories(&body);
        debug!(repos = citations.len(), "GitHub search complete");

        if citations.is_empty() {
            return AgentResult::partial(
                SourceKind::Code,
                format!("No repositories found for \"{sub_query}\"."),
                vec![],
                "empty result set",
            );
        }

        let answer = format_repositories(&body, &citations);
        AgentResult::ok(SourceKind::Code, answer, citations)
    }
}

/// Normalize repository search items into citations.
fn parse_repositories(body: &serde_json::Value) -> Vec<Citation> {
    let Some(items) = body["items"].as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let full_name = item["full_name"].as_str()?;
            let url = item["html_url"].as_str()?;
            let description = item["description"].as_str().unwrap_or("");
            Some(Citation::new(
                SourceKind::Code,
                full_name,
                url,
                description,
            ))
        })
        .collect()
}

fn format_repositories(body: &serde_json::Value, citations: &[Citation]) -> String {
    let empty = Vec::new();
    let items = body["items"].as_array().unwrap_or(&empty);

    let mut out = String::from("Relevant repositories:\n");
    for (citation, item) in citations.iter().zip(items) {
        let stars = item["stargazers_count"].as_u64().unwrap_or(0);
        let language = item["language"].as_str().unwrap_or("unknown");
        out.push_str(&format!(
            "- {} ({} stars, {}): {}\n",
            citation.title, stars, language, citation.snippet
        ));
    }
    out
}
