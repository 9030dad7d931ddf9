//! Web retrieval agent — DuckDuckGo Instant Answer API.
//!
//! Zero-configuration web search: the Instant Answer API requires no API
//! key and returns abstracts, direct answers, definitions, and related
//! topics rather than full result listings. Results are normalized into
//! citations; the abstract, when present, carries the highest relevance.

use async_trait::async_trait;
use research_application::{RetrievalAgent, RunContext};
use research_domain::{AgentResult, Citation, SourceKind};
use std::time::Duration;
use tracing::debug;

/// DuckDuckGo Instant Answer API endpoint (no API key required).
const DDG_API_URL: &str = "https://api.duckduckgo.com/";

/// DuckDuckGo HTML results endpoint, used when the instant answer is empty.
const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";

/// How many related topics to keep as citations.
const MAX_RELATED_TOPICS: usize = 8;

/// Web search agent backed by the DuckDuckGo Instant Answer API
pub struct WebSearchAgent {
    client: reqwest::Client,
}

impl WebSearchAgent {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RetrievalAgent for WebSearchAgent {
    fn kind(&self) -> SourceKind {
        SourceKind::Web
    }

    async fn retrieve(
        &self,
        sub_query: &str,
        _ctx: &RunContext,
        _deadline: Duration,
    ) -> AgentResult {
        let response = match self
            .client
            .get(DDG_API_URL)
            .query(&[
                ("q", sub_query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .header("User-Agent", "copilot-research/0.4 (research agent)")
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                return AgentResult::failed(
                    SourceKind::Web,
                    format!("search request failed: {e}"),
                );
            }
        };

        if !response.status().is_success() {
            return AgentResult::failed(
                SourceKind::Web,
                format!("search API returned {}", response.status()),
            );
        }

        let body: serde_json::Value = match response.json().await {
            Ok(j) => j,
            Err(e) => {
                return AgentResult::failed(
                    SourceKind::Web,
                    format!("failed to parse search results: {e}"),
                );
            }
        };

        let (answer, citations) = parse_instant_answer(sub_query, &body);
        debug!(citations = citations.len(), "Instant answer parsed");

        if !citations.is_empty() {
            return AgentResult::ok(SourceKind::Web, answer, citations);
        }

        // No instant answer — fall back to the HTML results page.
        match self.search_html(sub_query).await {
            Ok(citations) if !citations.is_empty() => {
                let listing = citations
                    .iter()
                    .map(|c| format!("- {} ({})", c.title, c.url))
                    .collect::<Vec<_>>()
                    .join("\n");
                AgentResult::ok(
                    SourceKind::Web,
                    format!("Top web results:\n{listing}"),
                    citations,
                )
            }
            Ok(_) => AgentResult::partial(
                SourceKind::Web,
                answer,
                vec![],
                "no web results for this query",
            ),
            Err(e) => AgentResult::partial(
                SourceKind::Web,
                answer,
                vec![],
                format!("result listing unavailable: {e}"),
            ),
        }
    }
}

impl WebSearchAgent {
    /// Query the HTML results endpoint and scrape the result listing.
    async fn search_html(&self, query: &str) -> Result<Vec<Citation>, reqwest::Error> {
        let html = self
            .client
            .get(DDG_HTML_URL)
            .query(&[("q", query)])
            .header("User-Agent", "copilot-research/0.4 (research agent)")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(parse_html_results(&html))
    }
}

/// Extract an answer text and citations from an Instant Answer payload.
fn parse_instant_answer(query: &str, data: &serde_json::Value) -> (String, Vec<Citation>) {
    let mut sections: Vec<String> = Vec::new();
    let mut citations: Vec<Citation> = Vec::new();

    if let Some(abstract_text) = data["AbstractText"].as_str()
        && !abstract_text.is_empty()
    {
        let source = data["AbstractSource"].as_str().unwrap_or("Unknown");
        let url = data["AbstractURL"].as_str().unwrap_or("");
        sections.push(format!("{abstract_text} (source: {source})"));
        if !url.is_empty() {
            citations.push(
                Citation::new(SourceKind::Web, source, url, abstract_text)
                    .with_relevance(0.9),
            );
        }
    }

    if let Some(answer) = data["Answer"].as_str()
        && !answer.is_empty()
    {
        sections.push(format!("Direct answer: {answer}"));
    }

    if let Some(definition) = data["Definition"].as_str()
        && !definition.is_empty()
    {
        let source = data["DefinitionSource"].as_str().unwrap_or("Unknown");
        let url = data["DefinitionURL"].as_str().unwrap_or("");
        sections.push(format!("Definition ({source}): {definition}"));
        if !url.is_empty() {
            citations.push(
                Citation::new(SourceKind::Web, format!("Definition: {source}"), url, definition)
                    .with_relevance(0.7),
            );
        }
    }

    if let Some(topics) = data["RelatedTopics"].as_array() {
        let mut related_lines = Vec::new();
        for topic in topics {
            let Some(text) = topic["Text"].as_str() else {
                // Nested topic group
                continue;
            };
            let url = topic["FirstURL"].as_str().unwrap_or("");
            if text.is_empty() || url.is_empty() {
                continue;
            }
            related_lines.push(format!("- {text}"));
            citations.push(
                Citation::new(SourceKind::Web, first_sentence(text), url, text)
                    .with_relevance(0.5),
            );
            if related_lines.len() >= MAX_RELATED_TOPICS {
                break;
            }
        }
        if !related_lines.is_empty() {
            sections.push(format!("Related topics:\n{}", related_lines.join("\n")));
        }
    }

    let answer = if sections.is_empty() {
        format!("No instant answer available for \"{query}\".")
    } else {
        sections.join("\n\n")
    };

    (answer, citations)
}

/// A short title from a related-topic text blob.
fn first_sentence(text: &str) -> String {
    if let Some(cut) = text.find(" - ").or_else(|| text.find(". ")) {
        return text[..cut].to_string();
    }
    text.chars().take(80).collect()
}

/// Extract result links from a DuckDuckGo HTML results page.
///
/// Used as a fallback when the Instant Answer API has nothing: the HTML
/// endpoint returns a classic result listing we can mine for citations.
fn parse_html_results(html: &str) -> Vec<Citation> {
    let document = scraper::Html::parse_document(html);
    let result_selector = scraper::Selector::parse("a.result__a").expect("static selector");
    let snippet_selector =
        scraper::Selector::parse("a.result__snippet").expect("static selector");

    let snippets: Vec<String> = document
        .select(&snippet_selector)
        .map(|e| e.text().collect::<String>())
        .collect();

    document
        .select(&result_selector)
        .enumerate()
        .filter_map(|(i, element)| {
            let href = element.value().attr("href")?;
            let title = element.text().collect::<String>();
            if title.trim().is_empty() || href.trim().is_empty() {
                return None;
            }
            let snippet = snippets.get(i).cloned().unwrap_or_default();
            Some(Citation::new(SourceKind::Web, title.trim(), href, snippet.trim()))
        })
        .take(MAX_RELATED_TOPICS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_abstract() {
        let data = serde_json::json!({
            "AbstractText": "Rust is a systems programming language.",
            "AbstractSource": "Wikipedia",
            "AbstractURL": "https://en.wikipedia.org/wiki/Rust_(programming_language)",
            "Answer": "",
            "Definition": "",
            "RelatedTopics": [],
        });

        let (answer, citations) = parse_instant_answer("Rust", &data);
        assert!(answer.contains("systems programming language"));
        assert_eq!(citations.len(), 1);
        assert_eq!(citations[0].relevance, Some(0.9));
        assert_eq!(citations[0].source_type, SourceKind::Web);
    }

    #[test]
    fn test_parse_empty_payload() {
        let data = serde_json::json!({
            "AbstractText": "",
            "Answer": "",
            "Definition": "",
            "RelatedTopics": [],
        });

        let (answer, citations) = parse_instant_answer("obscure", &data);
        assert!(answer.contains("No instant answer"));
        assert!(citations.is_empty());
    }

    #[test]
    fn test_parse_related_topics_capped() {
        let topics: Vec<_> = (0..20)
            .map(|i| {
                serde_json::json!({
                    "Text": format!("Topic {i} - description"),
                    "FirstURL": format!("https://example.com/{i}"),
                })
            })
            .collect();
        let data = serde_json::json!({
            "AbstractText": "",
            "Answer": "",
            "Definition": "",
            "RelatedTopics": topics,
        });

        let (_, citations) = parse_instant_answer("q", &data);
        assert_eq!(citations.len(), MAX_RELATED_TOPICS);
        assert_eq!(citations[0].title, "Topic 0");
    }

    #[test]
    fn test_first_sentence_truncates() {
        assert_eq!(first_sentence("Rust - a language"), "Rust");
        assert_eq!(first_sentence("Short"), "Short");
    }

    #[test]
    fn test_parse_html_results() {
        let html = r#"
<html><body>
<div class="result">
  <a class="result__a" href="https://example.com/one">First result</a>
  <a class="result__snippet" href="https://example.com/one">First snippet text</a>
</div>
<div class="result">
  <a class="result__a" href="https://example.com/two">Second result</a>
  <a class="result__snippet" href="https://example.com/two">Second snippet text</a>
</div>
</body></html>"#;

        let citations = parse_html_results(html);
        assert_eq!(citations.len(), 2);
        assert_eq!(citations[0].title, "First result");
        assert_eq!(citations[0].url, "https://example.com/one");
        assert_eq!(citations[1].snippet, "Second snippet text");
    }
}
