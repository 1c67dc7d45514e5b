//! Groq LLM Provider
//!
//! Implementation of `LlmProvider` for Groq's hosted, OpenAI-compatible chat
//! completions API.

use std::time::Duration;

use agent_core::{
    error::{AgentError, Result},
    message::{Message, Role},
    provider::{Completion, FinishReason, GenerationOptions, LlmProvider, ModelInfo, TokenUsage},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "GROQ_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// The API accepts at most this many stop sequences
const MAX_STOP_SEQUENCES: usize = 4;

/// Groq provider configuration
#[derive(Clone)]
pub struct GroqConfig {
    /// Secret API key
    pub api_key: String,

    /// API root, without trailing slash
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GroqConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GroqConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: 60,
        }
    }

    /// Read `GROQ_API_KEY`, `GROQ_BASE_URL` and `GROQ_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GroqConfig::from_env`] with an injectable variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_VAR)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AgentError::Config(format!("Please set {API_KEY_VAR} in .env file")))?;

        let mut config = Self::new(api_key);
        if let Some(url) = lookup("GROQ_BASE_URL").filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(secs) = lookup("GROQ_TIMEOUT_SECS").and_then(|s| s.trim().parse().ok()) {
            config.timeout_secs = secs;
        }
        Ok(config)
    }
}

/// Groq completion provider
pub struct GroqProvider {
    client: reqwest::Client,
    config: GroqConfig,
}

impl GroqProvider {
    /// Create from configuration
    pub fn from_config(config: GroqConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(GroqConfig::from_env()?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url)
    }

    fn build_request<'a>(messages: &'a [Message], options: &'a GenerationOptions) -> ChatRequest<'a> {
        ChatRequest {
            model: &options.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: match m.role {
                        Role::System => "system",
                        Role::User => "user",
                        Role::Assistant => "assistant",
                    },
                    content: &m.content,
                })
                .collect(),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            stop: options
                .stop_sequences
                .iter()
                .take(MAX_STOP_SEQUENCES)
                .map(String::as_str)
                .collect(),
        }
    }

    fn convert_completion(response: ChatResponse, model: &str) -> Result<Completion> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::Provider("response contained no choices".into()))?;

        Ok(Completion {
            content: choice.message.content.unwrap_or_default(),
            model: response.model.unwrap_or_else(|| model.to_string()),
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason.as_deref().map(FinishReason::parse),
        })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_status(status, &error_message(&body)))
    }
}

fn map_transport_error(err: reqwest::Error) -> AgentError {
    if err.is_timeout() || err.is_connect() {
        AgentError::ProviderUnavailable(err.to_string())
    } else {
        AgentError::Provider(err.to_string())
    }
}

fn map_status(status: StatusCode, message: &str) -> AgentError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AgentError::Auth(message.to_string()),
        StatusCode::TOO_MANY_REQUESTS => AgentError::RateLimited(message.to_string()),
        s if s.is_server_error() => AgentError::ProviderUnavailable(format!("{s}: {message}")),
        s => AgentError::Provider(format!("{s}: {message}")),
    }
}

/// Pull `error.message` out of an OpenAI-style error body
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[async_trait]
impl LlmProvider for GroqProvider {
    fn name(&self) -> &str {
        "Groq"
    }

    async fn health_check(&self) -> Result<bool> {
        match self.list_models().await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("Groq health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(&self, messages: &[Message], options: &GenerationOptions) -> Result<Completion> {
        let request = Self::build_request(messages, options);
        tracing::debug!(model = %options.model, messages = messages.len(), "Sending completion request");

        let response = self
            .send(self.client.post(self.url("chat/completions")).json(&request))
            .await?;
        let body: ChatResponse = response.json().await.map_err(map_transport_error)?;

        let completion = Self::convert_completion(body, &options.model)?;
        if let Some(usage) = &completion.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion received"
            );
        }
        Ok(completion)
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let response = self.send(self.client.get(self.url("models"))).await?;
        let body: ModelList = response.json().await.map_err(map_transport_error)?;

        Ok(body
            .data
            .into_iter()
            .map(|m| ModelInfo {
                id: m.id,
                owned_by: m.owned_by,
                context_length: m.context_window,
            })
            .collect())
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
    #[serde(default)]
    owned_by: Option<String>,
    #[serde(default)]
    context_window: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}
