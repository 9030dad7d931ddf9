//! Intent decision value objects
//!
//! An [`IntentDecision`] maps each selected agent to the sub-query it
//! should run. The map is never empty — a classification that selects
//! nothing must resolve to [`IntentDecision::fallback`] instead. Backed by
//! a `BTreeMap` so iteration order (and therefore dispatch slot ordering
//! and citation tie-breaking) is deterministic.

use crate::core::error::DomainError;
use crate::source::SourceKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Raw classifier output extracted from model text
#[derive(Debug, Clone, Deserialize)]
pub struct IntentSelection {
    /// Agent identifiers the model selected
    #[serde(default)]
    pub agents: Vec<String>,
    /// Why these agents were selected
    #[serde(default)]
    pub reasoning: String,
    /// Certainty of the selection, `0.0..=1.0`
    #[serde(default)]
    pub confidence: f32,
    /// Agent-specific query refinements, keyed by agent identifier
    #[serde(default)]
    pub sub_queries: HashMap<String, String>,
}

/// Which agents to invoke, and with what sub-query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentDecision {
    selections: BTreeMap<SourceKind, String>,
}

impl IntentDecision {
    /// Build a decision from an explicit map. Fails on an empty map — the
    /// non-empty invariant is enforced at construction.
    pub fn from_map(selections: BTreeMap<SourceKind, String>) -> Result<Self, DomainError> {
        if selections.is_empty() {
            return Err(DomainError::EmptyDecision);
        }
        Ok(Self { selections })
    }

    /// Single-agent decision.
    pub fn single(agent: SourceKind, sub_query: impl Into<String>) -> Self {
        let mut selections = BTreeMap::new();
        selections.insert(agent, sub_query.into());
        Self { selections }
    }

    /// Default decision used when classification selects nothing or fails
    /// outright: web search plus the local index when available, and at
    /// minimum the first available agent. Every selected agent receives
    /// the plain retrieval query.
    pub fn fallback(available: &[SourceKind], query: &str) -> Self {
        let mut selections = BTreeMap::new();
        for kind in [SourceKind::Web, SourceKind::Local] {
            if available.contains(&kind) {
                selections.insert(kind, query.to_string());
            }
        }
        if selections.is_empty() {
            // Degenerate registry without a web agent — take what exists.
            if let Some(&first) = available.first() {
                selections.insert(first, query.to_string());
            } else {
                selections.insert(SourceKind::Web, query.to_string());
            }
        }
        Self { selections }
    }

    /// Validate a raw [`IntentSelection`] into a decision.
    ///
    /// Unknown identifiers and agents outside `available` are filtered
    /// out; each surviving agent gets its suggested sub-query or, absent
    /// one, the plain retrieval query. Returns `None` when nothing
    /// survives filtering so the caller can apply [`Self::fallback`].
    pub fn from_selection(
        selection: &IntentSelection,
        available: &[SourceKind],
        query: &str,
    ) -> Option<Self> {
        let mut selections = BTreeMap::new();
        for name in &selection.agents {
            let Ok(kind) = name.parse::<SourceKind>() else {
                continue;
            };
            if !available.contains(&kind) {
                continue;
            }
            let sub_query = selection
                .sub_queries
                .get(name)
                .or_else(|| selection.sub_queries.get(kind.as_str()))
                .map(|q| q.trim())
                .filter(|q| !q.is_empty())
                .unwrap_or(query);
            selections.insert(kind, sub_query.to_string());
        }
        if selections.is_empty() {
            None
        } else {
            Some(Self { selections })
        }
    }

    /// Selected agents in deterministic order.
    pub fn agents(&self) -> impl Iterator<Item = SourceKind> + '_ {
        self.selections.keys().copied()
    }

    /// `(agent, sub-query)` pairs in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (SourceKind, &str)> {
        self.selections.iter().map(|(k, q)| (*k, q.as_str()))
    }

    pub fn sub_query(&self, agent: SourceKind) -> Option<&str> {
        self.selections.get(&agent).map(String::as_str)
    }

    pub fn contains(&self, agent: SourceKind) -> bool {
        self.selections.contains_key(&agent)
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}
