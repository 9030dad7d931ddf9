//! Retrieval agent port and registry
//!
//! Every source-specific agent implements [`RetrievalAgent`]. The
//! contract is strict so the dispatcher can stay simple:
//!
//! - `retrieve` never fails: recoverable upstream conditions map to a
//!   `Partial` result with error detail, unrecoverable ones to `Failed`.
//! - The supplied deadline must be respected; the dispatcher additionally
//!   enforces it from the outside and records overruns as timeouts.
//! - Agents do not mutate shared state. Whatever caching or pooling an
//!   adapter needs is internal to it and invisible to the pipeline.
//!
//! Adding a source family means adding a [`SourceKind`] variant and an
//! adapter registered here — the pipeline itself does not change.

use crate::context::RunContext;
use async_trait::async_trait;
use research_domain::{AgentResult, SourceKind};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// A source-specific retrieval agent
#[async_trait]
pub trait RetrievalAgent: Send + Sync {
    /// Which source family this agent retrieves from.
    fn kind(&self) -> SourceKind;

    /// Run one retrieval for `sub_query` within `deadline`.
    ///
    /// Infallible by contract: failures are encoded in the returned
    /// result's status and error detail.
    async fn retrieve(&self, sub_query: &str, ctx: &RunContext, deadline: Duration) -> AgentResult;
}

/// Registry mapping source kinds to their agent implementations
#[derive(Default, Clone)]
pub struct AgentRegistry {
    agents: BTreeMap<SourceKind, Arc<dyn RetrievalAgent>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent under its own kind, replacing any previous one.
    pub fn register(&mut self, agent: Arc<dyn RetrievalAgent>) {
        self.agents.insert(agent.kind(), agent);
    }

    /// Builder-style registration.
    pub fn with_agent(mut self, agent: Arc<dyn RetrievalAgent>) -> Self {
        self.register(agent);
        self
    }

    pub fn get(&self, kind: SourceKind) -> Option<Arc<dyn RetrievalAgent>> {
        self.agents.get(&kind).cloned()
    }

    /// Registered source kinds, in deterministic order.
    pub fn available(&self) -> Vec<SourceKind> {
        self.agents.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("available", &self.available())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAgent(SourceKind);

    #[async_trait]
    impl RetrievalAgent for FixedAgent {
        fn kind(&self) -> SourceKind {
            self.0
        }

        async fn retrieve(
            &self,
            _sub_query: &str,
            _ctx: &RunContext,
            _deadline: Duration,
        ) -> AgentResult {
            AgentResult::ok(self.0, "answer", vec![])
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = AgentRegistry::new()
            .with_agent(Arc::new(FixedAgent(SourceKind::Web)))
            .with_agent(Arc::new(FixedAgent(SourceKind::Code)));

        assert_eq!(registry.len(), 2);
        assert!(registry.get(SourceKind::Web).is_some());
        assert!(registry.get(SourceKind::Video).is_none());
        assert_eq!(
            registry.available(),
            vec![SourceKind::Web, SourceKind::Code]
        );
    }

    #[test]
    fn test_reregistration_replaces() {
        let mut registry = AgentRegistry::new();
        registry.register(Arc::new(FixedAgent(SourceKind::Web)));
        registry.register(Arc::new(FixedAgent(SourceKind::Web)));
        assert_eq!(registry.len(), 1);
    }
}
