//! Citation record and deduplication
//!
//! Every retrieval agent normalizes its findings into [`Citation`] records.
//! Identity for deduplication is `(source_type, lowercased url)`; when two
//! records collide, the one with the higher relevance score survives and
//! ties keep the first-seen record. [`dedupe_citations`] is pure and
//! idempotent, so aggregating the same inputs twice yields identical output.

use crate::source::SourceKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Normalized reference to a piece of source content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Source family this citation came from
    pub source_type: SourceKind,
    /// Human-readable title
    pub title: String,
    /// URL, or a path-like locator for local documents (never empty)
    pub url: String,
    /// Short excerpt supporting the answer
    #[serde(default)]
    pub snippet: String,
    /// Relevance score in `0.0..=1.0`, when the source reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f32>,
}

impl Citation {
    /// Creates a citation without a relevance score.
    pub fn new(
        source_type: SourceKind,
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            source_type,
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            relevance: None,
        }
    }

    /// Attaches a relevance score, clamped into `0.0..=1.0`.
    pub fn with_relevance(mut self, score: f32) -> Self {
        self.relevance = Some(score.clamp(0.0, 1.0));
        self
    }

    /// A citation is valid when its locator is non-empty and its relevance
    /// score, if present, is within bounds.
    pub fn is_valid(&self) -> bool {
        !self.url.trim().is_empty()
            && self.relevance.is_none_or(|r| (0.0..=1.0).contains(&r))
    }

    /// Identity used for deduplication.
    pub fn dedup_key(&self) -> (SourceKind, String) {
        (self.source_type, self.url.trim().to_lowercase())
    }
}

/// Deduplicate citations by `(source_type, url)` identity.
///
/// Keeps input order for first occurrences. On collision the record with
/// the higher relevance score replaces the earlier one in place; a missing
/// score always loses to a present one, and ties keep the first-seen
/// record. Invalid records (empty locator) are dropped.
pub fn dedupe_citations(citations: &[Citation]) -> Vec<Citation> {
    let mut out: Vec<Citation> = Vec::with_capacity(citations.len());
    let mut index: HashMap<(SourceKind, String), usize> = HashMap::new();

    for citation in citations {
        if !citation.is_valid() {
            continue;
        }
        let key = citation.dedup_key();
        match index.get(&key) {
            Some(&slot) => {
                if citation.relevance > out[slot].relevance {
                    out[slot] = citation.clone();
                }
            }
            None => {
                index.insert(key, out.len());
                out.push(citation.clone());
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web(url: &str, relevance: Option<f32>) -> Citation {
        let c = Citation::new(SourceKind::Web, "title", url, "snippet");
        match relevance {
            Some(r) => c.with_relevance(r),
            None => c,
        }
    }

    #[test]
    fn test_relevance_is_clamped() {
        let c = web("https://example.com", Some(2.5));
        assert_eq!(c.relevance, Some(1.0));
        let c = web("https://example.com", Some(-0.5));
        assert_eq!(c.relevance, Some(0.0));
    }

    #[test]
    fn test_empty_url_is_invalid() {
        let c = Citation::new(SourceKind::Local, "notes", "  ", "");
        assert!(!c.is_valid());
    }

    #[test]
    fn test_dedup_keeps_higher_relevance() {
        let a = web("https://example.com/a", Some(0.4));
        let b = web("https://example.com/b", Some(0.9));
        let c = web("https://example.com/A", Some(0.8));

        let deduped = dedupe_citations(&[a, b, c.clone()]);
        assert_eq!(deduped.len(), 2);
        // The higher-scored duplicate replaced the first record in place.
        assert_eq!(deduped[0].relevance, Some(0.8));
        assert_eq!(deduped[0].url, c.url);
        assert_eq!(deduped[1].relevance, Some(0.9));
    }

    #[test]
    fn test_dedup_tie_keeps_first_seen() {
        let first = web("https://example.com", Some(0.7));
        let second = Citation::new(SourceKind::Web, "other title", "https://example.com", "")
            .with_relevance(0.7);

        let deduped = dedupe_citations(&[first.clone(), second]);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].title, first.title);
    }

    #[test]
    fn test_dedup_missing_score_loses() {
        let unscored = web("https://example.com", None);
        let scored = web("https://example.com", Some(0.1));

        let deduped = dedupe_citations(&[unscored, scored.clone()]);
        assert_eq!(deduped[0].relevance, Some(0.1));
    }

    #[test]
    fn test_dedup_distinguishes_source_types() {
        let web_ref = web("https://example.com", None);
        let code_ref = Citation::new(SourceKind::Code, "repo", "https://example.com", "");

        let deduped = dedupe_citations(&[web_ref, code_ref]);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let input = vec![
            web("https://example.com/a", Some(0.4)),
            web("https://example.com/a", Some(0.9)),
            web("https://example.com/b", None),
        ];
        let once = dedupe_citations(&input);
        let twice = dedupe_citations(&once);
        assert_eq!(once, twice);
    }
}
