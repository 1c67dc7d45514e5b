//! Completion Provider Strategy
//!
//! Common interface for hosted LLM completion endpoints. The agent only ever
//! talks to the model through [`LlmProvider`], so swapping Groq for any other
//! OpenAI-compatible service needs no change to the reasoning loop.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_core::provider::{GenerationOptions, LlmProvider};
//!
//! let provider = GroqProvider::from_env()?;
//! let completion = provider.complete(&messages, &GenerationOptions::default()).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};
use crate::message::Message;

/// Default hosted model
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Configuration for LLM generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "llama-3.1-8b-instant")
    pub model: String,

    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Stop sequences
    #[serde(default)]
    pub stop_sequences: Vec<String>,
}

fn default_temperature() -> f32 {
    0.3
}
fn default_max_tokens() -> u32 {
    256
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            stop_sequences: Vec::new(),
        }
    }
}

impl GenerationOptions {
    /// Reject settings the completion service would refuse
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(AgentError::Config("model identifier is empty".into()));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(AgentError::Config(format!(
                "temperature {} is outside [0, 1]",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(AgentError::Config("max_tokens must be positive".into()));
        }
        Ok(())
    }
}

/// Response from an LLM completion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text
    pub content: String,

    /// Model that generated this response
    pub model: String,

    /// Token usage statistics (if available)
    pub usage: Option<TokenUsage>,

    /// Finish reason
    pub finish_reason: Option<FinishReason>,
}

impl Completion {
    /// Plain completion with no usage data
    pub fn text(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            usage: None,
            finish_reason: Some(FinishReason::Stop),
        }
    }

    /// Whether the provider cut the output at the token cap
    pub fn truncated(&self) -> bool {
        self.finish_reason == Some(FinishReason::Length)
    }
}

/// Token usage statistics
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Reason for completion finishing
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Error,
}

impl FinishReason {
    /// Map an OpenAI-style `finish_reason` string
    pub fn parse(raw: &str) -> Self {
        match raw {
            "stop" => FinishReason::Stop,
            "length" => FinishReason::Length,
            "content_filter" => FinishReason::ContentFilter,
            _ => FinishReason::Error,
        }
    }
}

/// Information about a model
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub owned_by: Option<String>,
    pub context_length: Option<u32>,
}

/// Strategy trait for completion providers
///
/// Implement this trait to add support for new LLM backends.
/// The agent works exclusively through this interface.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Check if the provider is reachable and the credentials are accepted
    async fn health_check(&self) -> Result<bool>;

    /// Generate a completion from messages
    async fn complete(&self, messages: &[Message], options: &GenerationOptions)
    -> Result<Completion>;

    /// List available models
    async fn list_models(&self) -> Result<Vec<ModelInfo>>;
}
