//! Reasoning Loop
//!
//! Implements the ReAct (Reason + Act) pattern. For every user utterance the
//! agent asks the model for the next action, runs at most one tool per cycle,
//! feeds the observation back and stops on a final answer. Two budgets bound
//! the loop: a number of cycles and a wall-clock duration. When either runs
//! out the agent either asks the model for a best-effort answer or gives up,
//! depending on [`EarlyStopping`].

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::action::{Action, PromptStyle};
use crate::error::{AgentError, Result};
use crate::message::{Conversation, Message};
use crate::postprocess::clean_answer;
use crate::prompt::{self, FINAL_ANSWER_NUDGE, Scratchpad};
use crate::provider::{GenerationOptions, LlmProvider};
use crate::tool::{Tool, ToolRegistry};

/// Shown when the model produced nothing at all
pub const NO_ANSWER: &str =
    "I'm sorry, I couldn't find an answer to your question. Please try rephrasing it.";

const OBSERVATION_STOP: &str = "\nObservation:";

/// What to do when the iteration or time budget runs out
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EarlyStopping {
    /// Ask the model for one last answer from the partial scratchpad
    #[default]
    Generate,
    /// Fail with [`AgentError::BudgetExhausted`]
    Force,
}

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Preamble placed before the tool list (style default when `None`)
    pub prefix: Option<String>,

    /// Reasoning format
    pub style: PromptStyle,

    /// Maximum reasoning cycles per utterance
    pub max_iterations: usize,

    /// Wall-clock budget per utterance
    pub max_execution_time: Option<Duration>,

    /// Behaviour once a budget is exhausted
    pub early_stopping: EarlyStopping,

    /// Feed format errors back to the model instead of failing
    pub handle_parsing_errors: bool,

    /// Generation options
    pub generation: GenerationOptions,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            prefix: None,
            style: PromptStyle::ZeroShot,
            max_iterations: 3,
            max_execution_time: Some(Duration::from_secs(20)),
            early_stopping: EarlyStopping::Generate,
            handle_parsing_errors: true,
            generation: GenerationOptions::default(),
        }
    }
}

/// The main Agent struct
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry>,
    config: AgentConfig,
    system_prompt: String,
}

impl Agent {
    /// Create a new agent
    pub fn new(provider: Arc<dyn LlmProvider>, tools: Arc<ToolRegistry>, mut config: AgentConfig) -> Self {
        if !config.generation.stop_sequences.iter().any(|s| s == OBSERVATION_STOP) {
            config.generation.stop_sequences.push(OBSERVATION_STOP.into());
        }
        let system_prompt = prompt::system_prompt(config.style, config.prefix.as_deref(), &tools);

        Self {
            provider,
            tools,
            config,
            system_prompt,
        }
    }

    /// Create with default configuration
    pub fn with_defaults(provider: Arc<dyn LlmProvider>, tools: Arc<ToolRegistry>) -> Self {
        Self::new(provider, tools, AgentConfig::default())
    }

    /// Answer one utterance, then record the exchange.
    ///
    /// The answer is cleaned of leaked reasoning markup. On error the
    /// conversation is left untouched.
    pub async fn chat(&self, conversation: &mut Conversation, input: &str) -> Result<String> {
        let raw = self.run(conversation, input).await?;

        let answer = if raw.trim().is_empty() {
            NO_ANSWER.to_string()
        } else {
            clean_answer(&raw)
        };

        conversation.record_exchange(input, answer.clone());
        Ok(answer)
    }

    /// Run the reasoning loop for one utterance and return the raw answer
    pub async fn run(&self, history: &Conversation, input: &str) -> Result<String> {
        let started = Instant::now();
        let mut scratchpad = Scratchpad::default();
        let mut iterations = 0;

        while self.within_budget(iterations, started.elapsed()) {
            let output = self.propose(history, input, &scratchpad.render()).await?;
            iterations += 1;

            match self.config.style.parse(&output) {
                Ok(Action::Final(answer)) => {
                    tracing::debug!(iterations, "Final answer reached");
                    return Ok(answer);
                }
                Ok(Action::Invoke { tool, input: query }) => {
                    let observation = self.invoke_tool(&tool, &query).await;
                    scratchpad.push(output, observation);
                }
                Err(err) if self.config.handle_parsing_errors => {
                    tracing::warn!(reason = err.reason, "Unparseable model output, asking again");
                    let observation = err.observation().to_string();
                    scratchpad.push(output, observation);
                }
                Err(err) => return Err(AgentError::Parse(err.to_string())),
            }
        }

        self.stop_early(history, input, &scratchpad, iterations, started.elapsed())
            .await
    }

    fn within_budget(&self, iterations: usize, elapsed: Duration) -> bool {
        if iterations >= self.config.max_iterations {
            return false;
        }
        self.config
            .max_execution_time
            .is_none_or(|limit| elapsed < limit)
    }

    /// Ask the model for the next step
    async fn propose(&self, history: &Conversation, input: &str, scratchpad: &str) -> Result<String> {
        let messages = [
            Message::system(self.system_prompt.clone()),
            Message::user(prompt::user_prompt(self.config.style, history, input, scratchpad)),
        ];

        let completion = self
            .provider
            .complete(&messages, &self.config.generation)
            .await?;

        if completion.truncated() {
            tracing::debug!("Completion hit the token cap");
        }
        tracing::debug!(output = %completion.content, "Model proposal");
        Ok(completion.content)
    }

    /// Execute a tool call, turning every failure into observation text
    async fn invoke_tool(&self, name: &str, query: &str) -> String {
        tracing::debug!(tool = %name, query = %query, "Executing tool");

        match self.tools.invoke(name, query).await {
            Ok(observation) => {
                tracing::debug!(tool = %name, chars = observation.len(), "Tool returned");
                observation
            }
            Err(_) => {
                tracing::warn!(tool = %name, "Model asked for an unknown tool");
                format!(
                    "{name} is not a valid tool, try one of [{}].",
                    self.tools.names().join(", ")
                )
            }
        }
    }

    async fn stop_early(
        &self,
        history: &Conversation,
        input: &str,
        scratchpad: &Scratchpad,
        iterations: usize,
        elapsed: Duration,
    ) -> Result<String> {
        tracing::warn!(
            iterations,
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "Reasoning budget exhausted"
        );

        match self.config.early_stopping {
            EarlyStopping::Force => Err(AgentError::BudgetExhausted {
                iterations,
                elapsed_secs: elapsed.as_secs(),
            }),
            EarlyStopping::Generate => {
                let mut pad = scratchpad.render();
                pad.push_str(FINAL_ANSWER_NUDGE);

                let output = self.propose(history, input, &pad).await?;
                let answer = match self.config.style.parse(&output) {
                    Ok(Action::Final(answer)) => answer,
                    _ => output.trim().to_string(),
                };

                if answer.is_empty() {
                    return Ok(NO_ANSWER.to_string());
                }
                Ok(answer)
            }
        }
    }

    /// Get the tool registry
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Get configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Builder for Agent configuration
pub struct AgentBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    tools: ToolRegistry,
    config: AgentConfig,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            tools: ToolRegistry::new(),
            config: AgentConfig::default(),
        }
    }

    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn tool<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.register(tool);
        self
    }

    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = Some(prefix.into());
        self
    }

    pub fn style(mut self, style: PromptStyle) -> Self {
        self.config.style = style;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.generation.model = model.into();
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.generation.temperature = temp;
        self
    }

    pub fn max_tokens(mut self, max: u32) -> Self {
        self.config.generation.max_tokens = max;
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn max_execution_time(mut self, limit: Duration) -> Self {
        self.config.max_execution_time = Some(limit);
        self
    }

    pub fn early_stopping(mut self, mode: EarlyStopping) -> Self {
        self.config.early_stopping = mode;
        self
    }

    pub fn handle_parsing_errors(mut self, enabled: bool) -> Self {
        self.config.handle_parsing_errors = enabled;
        self
    }

    pub fn build(self) -> Result<Agent> {
        let provider = self
            .provider
            .ok_or_else(|| AgentError::Config("Provider is required".into()))?;
        self.config.generation.validate()?;

        Ok(Agent::new(provider, Arc::new(self.tools), self.config))
    }
}
