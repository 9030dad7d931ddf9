//! Retrieval agent adapters
//!
//! One adapter per source family, each implementing the
//! [`RetrievalAgent`](research_application::RetrievalAgent) port. How an
//! adapter reaches its backing service is entirely its own concern — the
//! pipeline only sees the uniform contract.

mod academic;
mod cache;
mod code;
mod local;
mod video;
mod web;

pub use academic::AcademicSearchAgent;
pub use cache::CachedAgent;
pub use code::CodeSearchAgent;
pub use local::LocalDocsAgent;
pub use video::VideoSearchAgent;
pub use web::WebSearchAgent;

use crate::config::{ConfigValidationError, FileConfig};
use research_application::{AgentRegistry, RetrievalAgent};
use std::sync::Arc;
use tracing::info;

/// Build the agent registry from configuration.
///
/// Only enabled agents are registered; secrets are resolved from the
/// configured environment variables at construction time. When result
/// caching is enabled every agent is wrapped in a [`CachedAgent`].
pub fn build_agent_registry(
    config: &FileConfig,
    client: &reqwest::Client,
) -> Result<AgentRegistry, ConfigValidationError> {
    let mut agents: Vec<Arc<dyn RetrievalAgent>> = Vec::new();

    if config.agents.local {
        agents.push(Arc::new(LocalDocsAgent::new(&config.local.docs_dir)));
    }
    if config.agents.academic {
        agents.push(Arc::new(AcademicSearchAgent::new(client.clone())));
    }
    if config.agents.web {
        agents.push(Arc::new(WebSearchAgent::new(client.clone())));
    }
    if config.agents.code {
        let token = std::env::var(&config.secrets.code_token_env).ok();
        agents.push(Arc::new(CodeSearchAgent::new(client.clone(), token)));
    }
    if config.agents.video {
        let api_key = std::env::var(&config.secrets.video_api_key_env).ok();
        agents.push(Arc::new(VideoSearchAgent::new(client.clone(), api_key)));
    }

    if agents.is_empty() {
        return Err(ConfigValidationError::NoAgentsEnabled);
    }

    let mut registry = AgentRegistry::new();
    for agent in agents {
        if config.cache.enabled {
            registry.register(Arc::new(CachedAgent::new(agent)));
        } else {
            registry.register(agent);
        }
    }

    info!(
        agents = registry.len(),
        cached = config.cache.enabled,
        "Agent registry created"
    );
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileAgentsConfig;
    use research_domain::SourceKind;

    #[test]
    fn test_registry_respects_enable_flags() {
        let mut config = FileConfig::default();
        config.agents = FileAgentsConfig {
            local: false,
            academic: true,
            web: true,
            code: false,
            video: false,
        };

        let registry = build_agent_registry(&config, &reqwest::Client::new()).unwrap();
        assert_eq!(
            registry.available(),
            vec![SourceKind::Academic, SourceKind::Web]
        );
    }

    #[test]
    fn test_empty_registry_is_an_error() {
        let mut config = FileConfig::default();
        config.agents = FileAgentsConfig {
            local: false,
            academic: false,
            web: false,
            code: false,
            video: false,
        };

        assert!(build_agent_registry(&config, &reqwest::Client::new()).is_err());
    }
}
