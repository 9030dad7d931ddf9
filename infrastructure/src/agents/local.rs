//! Local-document retrieval agent.
//!
//! Retrieves from a directory of previously indexed markdown/text
//! documents with lexical term matching: documents are scored by how many
//! distinct query terms they contain and how often, and the snippet is
//! taken around the first match. Index internals (embeddings, chunking)
//! are outside this core, so matching stays deliberately simple; the
//! relevance score feeds straight into citation deduplication.

use async_trait::async_trait;
use research_application::{RetrievalAgent, RunContext};
use research_domain::{AgentResult, Citation, SourceKind};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Documents returned per query.
const MAX_RESULTS: usize = 5;

/// Snippet length around the first matching term.
const SNIPPET_CHARS: usize = 300;

/// Local document search agent over an indexed directory
pub struct LocalDocsAgent {
    docs_dir: PathBuf,
}

impl LocalDocsAgent {
    pub fn new(docs_dir: impl Into<PathBuf>) -> Self {
        Self {
            docs_dir: docs_dir.into(),
        }
    }
}

#[async_trait]
impl RetrievalAgent for LocalDocsAgent {
    fn kind(&self) -> SourceKind {
        SourceKind::Local
    }

    async fn retrieve(
        &self,
        sub_query: &str,
        _ctx: &RunContext,
        _deadline: Duration,
    ) -> AgentResult {
        if !self.docs_dir.is_dir() {
            return AgentResult::failed(
                SourceKind::Local,
                format!("document directory not found: {}", self.docs_dir.display()),
            );
        }

        let docs_dir = self.docs_dir.clone();
        let query = sub_query.to_string();

        // File scanning is blocking work; keep it off the async runtime.
        let scan = tokio::task::spawn_blocking(move || scan_documents(&docs_dir, &query)).await;

        let matches = match scan {
            Ok(Ok(matches)) => matches,
            Ok(Err(e)) => {
                return AgentResult::failed(
                    SourceKind::Local,
                    format!("document scan failed: {e}"),
                );
            }
            Err(e) => {
                return AgentResult::failed(
                    SourceKind::Local,
                    format!("document scan panicked: {e}"),
                );
            }
        };

        debug!(matches = matches.len(), "Local document scan complete");

        if matches.is_empty() {
            return AgentResult::partial(
                SourceKind::Local,
                "No matching documents in the local index.".to_string(),
                vec![],
                "no matching documents",
            );
        }

        let mut answer = String::from("Matching local documents:\n");
        let mut citations = Vec::new();
        for m in matches.iter().take(MAX_RESULTS) {
            answer.push_str(&format!("- {}: {}\n", m.title, m.snippet));
            citations.push(
                Citation::new(SourceKind::Local, &m.title, &m.path, &m.snippet)
                    .with_relevance(m.relevance),
            );
        }

        AgentResult::ok(SourceKind::Local, answer, citations)
    }
}

/// One scored document match
struct DocMatch {
    title: String,
    path: String,
    snippet: String,
    relevance: f32,
}

/// Terms worth matching: lowercase, longer than two characters.
fn query_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > 2)
        .map(str::to_string)
        .collect()
}

/// Scan the directory for documents matching the query terms, best first.
fn scan_documents(docs_dir: &Path, query: &str) -> Result<Vec<DocMatch>, glob::PatternError> {
    let terms = query_terms(query);
    if terms.is_empty() {
        return Ok(Vec::new());
    }

    let mut matches = Vec::new();
    for extension in ["md", "txt"] {
        let pattern = format!("{}/**/*.{extension}", docs_dir.display());
        for path in glob::glob(&pattern)?.flatten() {
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            if let Some(doc_match) = score_document(&path, &content, &terms) {
                matches.push(doc_match);
            }
        }
    }

    matches.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(matches)
}

/// Score one document against the query terms. Relevance is the fraction
/// of distinct terms present; documents matching no terms return `None`.
fn score_document(path: &Path, content: &str, terms: &[String]) -> Option<DocMatch> {
    let lower = content.to_lowercase();

    let mut matched = 0usize;
    let mut first_hit = usize::MAX;
    for term in terms {
        if let Some(pos) = lower.find(term.as_str()) {
            matched += 1;
            first_hit = first_hit.min(pos);
        }
    }
    if matched == 0 {
        return None;
    }

    let title = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Some(DocMatch {
        title,
        path: path.display().to_string(),
        snippet: snippet_around(content, first_hit),
        relevance: matched as f32 / terms.len() as f32,
    })
}

/// A snippet of the document around the first match position.
///
/// The position comes from a lowercased copy, so it is clamped back onto
/// a character boundary of the original text before slicing.
fn snippet_around(content: &str, byte_pos: usize) -> String {
    let mut pos = byte_pos.min(content.len());
    while pos > 0 && !content.is_char_boundary(pos) {
        pos -= 1;
    }
    let start = content[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    content[start..]
        .chars()
        .take(SNIPPET_CHARS)
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
