//! OpenAI-compatible HTTP gateway
//!
//! Implements the [`LlmGateway`] port against any chat-completions
//! endpoint speaking the OpenAI wire format (hosted APIs, llama.cpp,
//! vLLM, LM Studio, ...). The pipeline never sees the wire format; it
//! gets back plain completion text and maps structure out of it itself.

use async_trait::async_trait;
use research_application::{GatewayError, LlmGateway};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::config::FileGatewayConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Gateway adapter for OpenAI-compatible chat-completion endpoints
pub struct OpenAiCompatGateway {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
}

impl OpenAiCompatGateway {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
            temperature: 0.1,
        }
    }

    /// Build from file configuration, resolving the API key from the
    /// configured environment variable. A missing key is allowed — local
    /// endpoints usually need none.
    pub fn from_config(config: &FileGatewayConfig) -> Self {
        Self::new(&config.base_url, &config.model)
            .with_api_key(std::env::var(&config.api_key_env).ok())
            .with_temperature(config.temperature)
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn error_for_status(status: reqwest::StatusCode, body: &str) -> GatewayError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            GatewayError::RateLimited
        } else if status.is_server_error()
            || status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            GatewayError::Unavailable(format!("{status}: {body}"))
        } else {
            GatewayError::RequestFailed(format!("{status}: {body}"))
        }
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatGateway {
    async fn complete(&self, system: &str, user: &str) -> Result<String, GatewayError> {
        let body = json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
        });

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else {
                GatewayError::Unavailable(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::error_for_status(status, &body));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("invalid response body: {e}")))?;

        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                GatewayError::RequestFailed("response contains no completion text".to_string())
            })?;

        debug!(model = %self.model, chars = content.len(), "Completion received");
        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_normalizes_trailing_slash() {
        let gateway = OpenAiCompatGateway::new("http://localhost:8080/v1/", "m");
        assert_eq!(gateway.endpoint(), "http://localhost:8080/v1/chat/completions");

        let gateway = OpenAiCompatGateway::new("http://localhost:8080/v1", "m");
        assert_eq!(gateway.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_status_mapping() {
        use reqwest::StatusCode;

        assert!(matches!(
            OpenAiCompatGateway::error_for_status(StatusCode::TOO_MANY_REQUESTS, ""),
            GatewayError::RateLimited
        ));
        assert!(matches!(
            OpenAiCompatGateway::error_for_status(StatusCode::SERVICE_UNAVAILABLE, ""),
            GatewayError::Unavailable(_)
        ));
        assert!(matches!(
            OpenAiCompatGateway::error_for_status(StatusCode::UNAUTHORIZED, ""),
            GatewayError::Unavailable(_)
        ));
        assert!(matches!(
            OpenAiCompatGateway::error_for_status(StatusCode::BAD_REQUEST, ""),
            GatewayError::RequestFailed(_)
        ));
    }
}
