//! Use cases — one per pipeline stage, plus the orchestrating entry point

pub mod aggregate_results;
pub mod analyze_query;
pub mod build_study_plan;
pub mod classify_intent;
pub mod dispatch_agents;
pub mod run_research;

#[cfg(test)]
pub(crate) mod testing {
    //! Shared test doubles for the use-case tests.

    use crate::context::RunContext;
    use crate::ports::llm_gateway::{GatewayError, LlmGateway};
    use crate::ports::retrieval_agent::RetrievalAgent;
    use async_trait::async_trait;
    use research_domain::{AgentResult, Citation, SourceKind};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Gateway that replays scripted responses in order.
    pub struct MockGateway {
        responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    }

    impl MockGateway {
        pub fn with_responses(responses: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }

        pub fn unavailable() -> Self {
            Self::with_responses(vec![])
        }
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, GatewayError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Unavailable("no scripted response".into())))
        }
    }

    /// Agent returning a fixed outcome, optionally after a delay.
    pub struct StubAgent {
        kind: SourceKind,
        citations: Vec<Citation>,
        delay: Option<Duration>,
        fail: bool,
    }

    impl StubAgent {
        pub fn ok(kind: SourceKind, citations: Vec<Citation>) -> Self {
            Self {
                kind,
                citations,
                delay: None,
                fail: false,
            }
        }

        pub fn failing(kind: SourceKind) -> Self {
            Self {
                kind,
                citations: vec![],
                delay: None,
                fail: true,
            }
        }

        pub fn slow(kind: SourceKind, delay: Duration) -> Self {
            Self {
                kind,
                citations: vec![],
                delay: Some(delay),
                fail: false,
            }
        }
    }

    #[async_trait]
    impl RetrievalAgent for StubAgent {
        fn kind(&self) -> SourceKind {
            self.kind
        }

        async fn retrieve(
            &self,
            sub_query: &str,
            _ctx: &RunContext,
            _deadline: Duration,
        ) -> AgentResult {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                AgentResult::failed(self.kind, "stub failure")
            } else {
                AgentResult::ok(
                    self.kind,
                    format!("{} answer for: {}", self.kind, sub_query),
                    self.citations.clone(),
                )
            }
        }
    }

    pub fn citation(kind: SourceKind, url: &str) -> Citation {
        Citation::new(kind, format!("title for {url}"), url, "snippet")
    }
}
