//! Scripted Provider
//!
//! Replays canned completions in order. Used for tests and offline demos of
//! the shells; every request is recorded so callers can inspect the prompts.

use std::collections::VecDeque;
use std::sync::Mutex;

use agent_core::{
    error::{AgentError, Result},
    message::Message,
    provider::{Completion, GenerationOptions, LlmProvider, ModelInfo},
};
use async_trait::async_trait;

/// Provider that answers from a fixed script
#[derive(Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedProvider {
    pub fn new<I, S>(script: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Mutex::new(script.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue another completion
    pub fn push(&self, completion: impl Into<String>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(completion.into());
        }
    }

    /// Every message list sent so far
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Number of completions served
    pub fn calls(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    async fn complete(&self, messages: &[Message], options: &GenerationOptions) -> Result<Completion> {
        self.requests
            .lock()
            .map_err(|_| AgentError::Provider("scripted provider lock poisoned".into()))?
            .push(messages.to_vec());

        let next = self
            .script
            .lock()
            .map_err(|_| AgentError::Provider("scripted provider lock poisoned".into()))?
            .pop_front();

        next.map(|content| Completion::text(content, options.model.clone()))
            .ok_or_else(|| AgentError::Provider("script exhausted".into()))
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        Ok(vec![ModelInfo {
            id: "scripted".into(),
            owned_by: None,
            context_length: None,
        }])
    }
}
