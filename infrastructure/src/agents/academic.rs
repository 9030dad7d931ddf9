//! Academic retrieval agent — arXiv query API.
//!
//! Searches arXiv's export API and normalizes entries into citations.
//! The Atom feed is mined with targeted tag extraction rather than a full
//! XML dependency — the handful of fields we need are stable and flat.

use async_trait::async_trait;
use regex::Regex;
use research_application::{RetrievalAgent, RunContext};
use research_domain::{AgentResult, Citation, SourceKind};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

const ARXIV_API_URL: &str = "https://export.arxiv.org/api/query";

/// Papers requested per query.
const MAX_RESULTS: usize = 10;

/// One parsed feed entry
#[derive(Debug, Clone, PartialEq)]
struct ArxivEntry {
    title: String,
    url: String,
    summary: String,
    published: String,
}

/// Academic paper search agent backed by the arXiv API
pub struct AcademicSearchAgent {
    client: reqwest::Client,
}

impl AcademicSearchAgent {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RetrievalAgent for AcademicSearchAgent {
    fn kind(&self) -> SourceKind {
        SourceKind::Academic
    }

    async fn retrieve(
        &self,
        sub_query: &str,
        _ctx: &RunContext,
        _deadline: Duration,
    ) -> AgentResult {
        let search_query = format!("all:{sub_query}");
        let max_results = MAX_RESULTS.to_string();
        let response = match self
            .client
            .get(ARXIV_API_URL)
            .query(&[
                ("search_query", search_query.as_str()),
                ("sortBy", "relevance"),
                ("max_results", max_results.as_str()),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                return AgentResult::failed(
                    SourceKind::Academic,
                    format!("arXiv request failed: {e}"),
                );
            }
        };

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return AgentResult::partial(
                SourceKind::Academic,
                String::new(),
                vec![],
                "arXiv rate limited the request",
            );
        }
        if !response.status().is_success() {
            return AgentResult::failed(
                SourceKind::Academic,
                format!("arXiv returned {}", response.status()),
            );
        }

        let body = match response.text().await {
            Ok(t) => t,
            Err(e) => {
                return AgentResult::failed(
                    SourceKind::Academic,
                    format!("failed to read arXiv feed: {e}"),
                );
            }
        };

        let entries = parse_atom_entries(&body);
        debug!(papers = entries.len(), "arXiv search complete");

        if entries.is_empty() {
            return AgentResult::partial(
                SourceKind::Academic,
                format!("No papers found for \"{sub_query}\"."),
                vec![],
                "empty result set",
            );
        }

        let answer = format_entries(&entries);
        let citations = entries
            .iter()
            .map(|e| {
                Citation::new(
                    SourceKind::Academic,
                    &e.title,
                    &e.url,
                    snippet_of(&e.summary, 300),
                )
            })
            .collect();

        AgentResult::ok(SourceKind::Academic, answer, citations)
    }
}

fn entry_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<entry>(.*?)</entry>").expect("static regex"))
}

/// Pull the inner text of the first `<tag>` in `xml`.
fn tag_text(xml: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = xml.find(&open)? + open.len();
    let end = xml[start..].find(&close)? + start;
    Some(normalize_whitespace(&xml[start..end]))
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn snippet_of(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Parse feed entries out of an arXiv Atom response.
fn parse_atom_entries(xml: &str) -> Vec<ArxivEntry> {
    entry_regex()
        .captures_iter(xml)
        .filter_map(|cap| {
            let entry = cap.get(1)?.as_str();
            let title = tag_text(entry, "title")?;
            let url = tag_text(entry, "id")?;
            if title.is_empty() || url.is_empty() {
                return None;
            }
            Some(ArxivEntry {
                title,
                url,
                summary: tag_text(entry, "summary").unwrap_or_default(),
                published: tag_text(entry, "published").unwrap_or_default(),
            })
        })
        .collect()
}

fn format_entries(entries: &[ArxivEntry]) -> String {
    let mut out = String::from("Relevant papers:\n");
    for entry in entries {
        let date = entry.published.split('T').next().unwrap_or_default();
        out.push_str(&format!(
            "- {} ({}): {}\n",
            entry.title,
            date,
            snippet_of(&entry.summary, 200)
        ));
    }
    out
}
