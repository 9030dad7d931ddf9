//! Result cache decorator for retrieval agents.
//!
//! Wraps any agent and memoizes usable results per normalized sub-query
//! for the lifetime of the session. Failed results are never cached, so
//! a transient upstream problem does not stick. Caching is entirely
//! internal to the adapter layer — the pipeline sees the same contract
//! with or without it.

use async_trait::async_trait;
use research_application::{RetrievalAgent, RunContext};
use research_domain::{AgentResult, SourceKind};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Caching decorator around another retrieval agent
pub struct CachedAgent {
    inner: Arc<dyn RetrievalAgent>,
    cache: Mutex<HashMap<String, AgentResult>>,
}

impl CachedAgent {
    pub fn new(inner: Arc<dyn RetrievalAgent>) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn cache_key(sub_query: &str) -> String {
        sub_query.trim().to_lowercase()
    }
}

#[async_trait]
impl RetrievalAgent for CachedAgent {
    fn kind(&self) -> SourceKind {
        self.inner.kind()
    }

    async fn retrieve(&self, sub_query: &str, ctx: &RunContext, deadline: Duration) -> AgentResult {
        let key = Self::cache_key(sub_query);

        if let Some(hit) = self.cache.lock().await.get(&key) {
            debug!(agent = %self.kind(), "Cache hit");
            return hit.clone();
        }

        let result = self.inner.retrieve(sub_query, ctx, deadline).await;
        if result.is_usable() {
            self.cache.lock().await.insert(key, result.clone());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use research_application::RunParams;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingAgent {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl RetrievalAgent for CountingAgent {
        fn kind(&self) -> SourceKind {
            SourceKind::Web
        }

        async fn retrieve(
            &self,
            sub_query: &str,
            _ctx: &RunContext,
            _deadline: Duration,
        ) -> AgentResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                AgentResult::failed(SourceKind::Web, "down")
            } else {
                AgentResult::ok(SourceKind::Web, format!("answer: {sub_query}"), vec![])
            }
        }
    }

    #[tokio::test]
    async fn test_second_retrieval_hits_cache() {
        let inner = Arc::new(CountingAgent {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let cached = CachedAgent::new(inner.clone());
        let ctx = RunContext::new(RunParams::default());

        let first = cached.retrieve("Rust", &ctx, Duration::from_secs(5)).await;
        // Same query modulo case/whitespace.
        let second = cached.retrieve("  rust ", &ctx, Duration::from_secs(5)).await;

        assert_eq!(first.answer, second.answer);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let inner = Arc::new(CountingAgent {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let cached = CachedAgent::new(inner.clone());
        let ctx = RunContext::new(RunParams::default());

        cached.retrieve("q", &ctx, Duration::from_secs(5)).await;
        cached.retrieve("q", &ctx, Duration::from_secs(5)).await;
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_distinct_queries_miss() {
        let inner = Arc::new(CountingAgent {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let cached = CachedAgent::new(inner.clone());
        let ctx = RunContext::new(RunParams::default());

        cached.retrieve("rust", &ctx, Duration::from_secs(5)).await;
        cached.retrieve("go", &ctx, Duration::from_secs(5)).await;
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }
}
