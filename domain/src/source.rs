//! Source kind value object
//!
//! A [`SourceKind`] identifies one retrieval source family. It doubles as
//! the agent identifier in an [`IntentDecision`](crate::routing::IntentDecision)
//! and as the `source_type` of a [`Citation`](crate::citation::Citation) —
//! the two are one-to-one. Adding a source means adding a variant here and
//! an adapter in the infrastructure layer; the pipeline itself is untouched.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One family of retrieval sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Previously indexed local documents
    Local,
    /// Academic paper search
    Academic,
    /// General web search
    Web,
    /// Code-host repository search
    Code,
    /// Video and transcript search
    Video,
}

impl SourceKind {
    /// All known source kinds, in canonical (dedup/tie-break) order.
    pub const ALL: [SourceKind; 5] = [
        SourceKind::Local,
        SourceKind::Academic,
        SourceKind::Web,
        SourceKind::Code,
        SourceKind::Video,
    ];

    /// Canonical identifier used in config keys, model output, and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Local => "local",
            SourceKind::Academic => "academic",
            SourceKind::Web => "web",
            SourceKind::Code => "code",
            SourceKind::Video => "video",
        }
    }

    /// One-line capability description, used when asking the classifier
    /// which agents fit a query.
    pub fn description(&self) -> &'static str {
        match self {
            SourceKind::Local => {
                "Previously indexed local documents. Best when the query refers to \
                 material the user has already uploaded."
            }
            SourceKind::Academic => {
                "Academic paper search. Best for research papers, scientific \
                 concepts, and publication-focused queries."
            }
            SourceKind::Web => {
                "General web search. Best for broad queries, articles, and any \
                 request for current or recent information."
            }
            SourceKind::Code => {
                "Code-host repository search. Best for implementations, libraries, \
                 and technical documentation."
            }
            SourceKind::Video => {
                "Video and transcript search. Best for tutorials and \
                 learning-oriented queries."
            }
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = DomainError;

    /// Parse a source identifier. Accepts the canonical names plus the
    /// aliases the upstream services are commonly referred to by
    /// ("arxiv", "github", "youtube").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "documents" => Ok(SourceKind::Local),
            "academic" | "arxiv" | "papers" => Ok(SourceKind::Academic),
            "web" | "search" => Ok(SourceKind::Web),
            "code" | "github" => Ok(SourceKind::Code),
            "video" | "youtube" => Ok(SourceKind::Video),
            other => Err(DomainError::UnknownSource(other.to_string())),
        }
    }
}
