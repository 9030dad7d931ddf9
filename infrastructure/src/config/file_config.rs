//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the config file. API
//! keys are never stored in the file — each section names the environment
//! variable to read the secret from, and the adapters resolve it at
//! construction time.

use research_application::RunParams;
use research_domain::SourceKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("run timeouts cannot be 0")]
    InvalidTimeout,

    #[error("gateway model name cannot be empty")]
    EmptyModelName,

    #[error("no retrieval agents are enabled")]
    NoAgentsEnabled,
}

/// Raw reasoning-gateway configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// Base URL of an OpenAI-compatible chat-completions endpoint
    pub base_url: String,
    /// Model identifier to request
    pub model: String,
    /// Sampling temperature for reasoning calls
    pub temperature: f32,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.1,
            api_key_env: "RESEARCH_API_KEY".to_string(),
        }
    }
}

/// Raw run-parameter configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRunConfig {
    pub max_clarification_rounds: usize,
    pub agent_timeout_seconds: u64,
    pub run_timeout_seconds: u64,
    pub max_citations_per_agent: usize,
}

impl Default for FileRunConfig {
    fn default() -> Self {
        Self {
            max_clarification_rounds: 3,
            agent_timeout_seconds: 30,
            run_timeout_seconds: 120,
            max_citations_per_agent: 10,
        }
    }
}

impl FileRunConfig {
    /// Convert into application-layer run parameters.
    pub fn to_params(&self) -> RunParams {
        RunParams::default()
            .with_max_clarification_rounds(self.max_clarification_rounds)
            .with_agent_timeout(Duration::from_secs(self.agent_timeout_seconds))
            .with_run_timeout(Duration::from_secs(self.run_timeout_seconds))
            .with_max_citations_per_agent(self.max_citations_per_agent)
    }
}

/// Per-source agent enable flags
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentsConfig {
    pub local: bool,
    pub academic: bool,
    pub web: bool,
    pub code: bool,
    pub video: bool,
}

impl Default for FileAgentsConfig {
    fn default() -> Self {
        Self {
            local: true,
            academic: true,
            web: true,
            code: true,
            video: true,
        }
    }
}

impl FileAgentsConfig {
    pub fn is_enabled(&self, kind: SourceKind) -> bool {
        match kind {
            SourceKind::Local => self.local,
            SourceKind::Academic => self.academic,
            SourceKind::Web => self.web,
            SourceKind::Code => self.code,
            SourceKind::Video => self.video,
        }
    }

    /// Enabled kinds in canonical order.
    pub fn enabled_kinds(&self) -> Vec<SourceKind> {
        SourceKind::ALL
            .into_iter()
            .filter(|k| self.is_enabled(*k))
            .collect()
    }
}

/// Local-document agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLocalConfig {
    /// Directory of indexed markdown/text documents
    pub docs_dir: String,
}

impl Default for FileLocalConfig {
    fn default() -> Self {
        Self {
            docs_dir: "markdown_docs".to_string(),
        }
    }
}

/// Cache behavior for agent results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    /// Cache agent results per (agent, sub-query) within a session
    pub enabled: bool,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Study-plan publishing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePublishConfig {
    /// Directory the markdown publisher writes plan artifacts into
    pub out_dir: String,
}

impl Default for FilePublishConfig {
    fn default() -> Self {
        Self {
            out_dir: "study_plans".to_string(),
        }
    }
}

/// Run trace logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Path of the JSONL run trace file; unset disables tracing
    pub run_log: Option<String>,
}

/// Secret environment variable names for the remote agents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSecretsConfig {
    /// Env var holding the code-host token (raises rate limits)
    pub code_token_env: String,
    /// Env var holding the video search API key
    pub video_api_key_env: String,
}

impl Default for FileSecretsConfig {
    fn default() -> Self {
        Self {
            code_token_env: "GITHUB_TOKEN".to_string(),
            video_api_key_env: "YOUTUBE_API_KEY".to_string(),
        }
    }
}

/// Complete raw configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub gateway: FileGatewayConfig,
    pub run: FileRunConfig,
    pub agents: FileAgentsConfig,
    pub local: FileLocalConfig,
    pub cache: FileCacheConfig,
    pub publish: FilePublishConfig,
    pub logging: FileLoggingConfig,
    pub secrets: FileSecretsConfig,
}

impl FileConfig {
    /// Validate the configuration combination.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.run.agent_timeout_seconds == 0 || self.run.run_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.gateway.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.agents.enabled_kinds().is_empty() {
            return Err(ConfigValidationError::NoAgentsEnabled);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.agents.enabled_kinds().len(), 5);
    }

    #[test]
    fn test_run_config_to_params() {
        let run = FileRunConfig {
            max_clarification_rounds: 1,
            agent_timeout_seconds: 5,
            run_timeout_seconds: 20,
            max_citations_per_agent: 3,
        };
        let params = run.to_params();
        assert_eq!(params.max_clarification_rounds, 1);
        assert_eq!(params.agent_timeout, Duration::from_secs(5));
        assert_eq!(params.run_timeout, Duration::from_secs(20));
        assert_eq!(params.max_citations_per_agent, 3);
    }

    #[test]
    fn test_agent_flags_prune_kinds() {
        let agents = FileAgentsConfig {
            local: false,
            academic: true,
            web: true,
            code: false,
            video: false,
        };
        assert_eq!(
            agents.enabled_kinds(),
            vec![SourceKind::Academic, SourceKind::Web]
        );
    }

    #[test]
    fn test_no_agents_is_invalid() {
        let mut config = FileConfig::default();
        config.agents = FileAgentsConfig {
            local: false,
            academic: false,
            web: false,
            code: false,
            video: false,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::NoAgentsEnabled)
        ));
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let mut config = FileConfig::default();
        config.run.run_timeout_seconds = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[gateway]
model = "llama-3.3-70b"
base_url = "http://localhost:8080/v1"

[run]
agent_timeout_seconds = 15

[agents]
video = false
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gateway.model, "llama-3.3-70b");
        assert_eq!(config.run.agent_timeout_seconds, 15);
        // Unspecified values keep their defaults.
        assert_eq!(config.run.run_timeout_seconds, 120);
        assert!(!config.agents.video);
        assert!(config.agents.web);
    }
}
