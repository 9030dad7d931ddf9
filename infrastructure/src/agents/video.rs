//! Video retrieval agent — YouTube Data API search.
//!
//! Searches for tutorial and lecture content. The Data API requires an
//! API key (read from the configured environment variable at registry
//! construction); without one the agent reports a failed result rather
//! than guessing.

use async_trait::async_trait;
use research_application::{RetrievalAgent, RunContext};
use research_domain::{AgentResult, Citation, SourceKind};
use std::time::Duration;
use tracing::debug;

const YOUTUBE_SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

/// Videos requested per query.
const MAX_RESULTS: usize = 10;

/// Video search agent backed by the YouTube Data API
pub struct VideoSearchAgent {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl VideoSearchAgent {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl RetrievalAgent for VideoSearchAgent {
    fn kind(&self) -> SourceKind {
        SourceKind::Video
    }

    async fn retrieve(
        &self,
        sub_query: &str,
        _ctx: &RunContext,
        _deadline: Duration,
    ) -> AgentResult {
        let Some(api_key) = &self.api_key else {
            return AgentResult::failed(
                SourceKind::Video,
                "video search requires an API key (set the configured environment variable)",
            );
        };

        let max_results = MAX_RESULTS.to_string();
        let response = match self
            .client
            .get(YOUTUBE_SEARCH_URL)
            .query(&[
                ("part", "snippet"),
                ("q", sub_query),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("key", api_key.as_str()),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                return AgentResult::failed(
                    SourceKind::Video,
                    format!("video search request failed: {e}"),
                );
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::FORBIDDEN {
            // Quota exhaustion comes back as 403.
            return AgentResult::partial(
                SourceKind::Video,
                String::new(),
                vec![],
                "video search quota exceeded",
            );
        }
        if !status.is_success() {
            return AgentResult::failed(
                SourceKind::Video,
                format!("video search returned {status}"),
            );
        }

        let body: serde_json::Value = match response.json().await {
            Ok(j) => j,
            Err(e) => {
                return AgentResult::failed(
                    SourceKind::Video,
                    format!("failed to parse video results: {e}"),
                );
            }
        };

        let citations = parse_videos(&body);
        debug!(videos = citations.len(), "Video search complete");

        if citations.is_empty() {
            return AgentResult::partial(
                SourceKind::Video,
                format!("No videos found for \"{sub_query}\"."),
                vec![],
                "empty result set",
            );
        }

        let answer = format_videos(&citations);
        AgentResult::ok(SourceKind::Video, answer, citations)
    }
}

/// Normalize search items into citations.
fn parse_videos(body: &serde_json::Value) -> Vec<Citation> {
    let Some(items) = body["items"].as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let video_id = item["id"]["videoId"].as_str()?;
            let snippet = &item["snippet"];
            let title = snippet["title"].as_str().unwrap_or("Untitled video");
            let description = snippet["description"].as_str().unwrap_or("");
            Some(Citation::new(
                SourceKind::Video,
                title,
                format!("https://www.youtube.com/watch?v={video_id}"),
                description,
            ))
        })
        .collect()
}

fn format_videos(citations: &[Citation]) -> String {
    let mut out = String::from("Relevant videos:\n");
    for citation in citations {
        out.push_str(&format!("- {} ({})\n", citation.title, citation.url));
    }
    out
}
