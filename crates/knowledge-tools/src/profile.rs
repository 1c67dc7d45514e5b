//! Bot Profiles
//!
//! The CLI and the browser chat run the same loop with different prompts,
//! budgets, sampling settings and tool wording.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use agent_core::{
    Agent, AgentConfig, EarlyStopping, GenerationOptions, LlmProvider, PromptStyle, ToolRegistry,
};

use crate::search::SearchBackend;
use crate::svckit::{WebSearchTool, WikipediaTool};
use crate::wiki::EncyclopediaBackend;

pub const CLI_WIKIPEDIA_DESCRIPTION: &str = "A wrapper around Wikipedia. Useful for when you need to answer general questions about people, places, companies, facts, historical events, or other subject matters. Input should be a search query.";

pub const CLI_SEARCH_DESCRIPTION: &str = "A wrapper around DuckDuckGo Search. Useful for when you need to answer questions about current events. Input should be a search query.";

pub const BROWSER_SEARCH_DESCRIPTION: &str = "Searches the web for current information. Use this for questions about:\n\
- Company CEOs and executives (e.g., 'Perplexity AI CEO', 'OpenAI CEO')\n\
- Recent news and events\n\
- Startups and tech companies\n\
Input: A search query like 'Perplexity AI CEO' or 'CEO of Tesla'\n\
Output: Multiple search results with titles and descriptions. Read them to find the answer.";

pub const BROWSER_WIKIPEDIA_DESCRIPTION: &str = "Searches Wikipedia for factual information. Use this for:\n\
- Well-known people and historical figures\n\
- Established companies\n\
- Scientific concepts and general knowledge\n\
Input: Topic name like 'Apple Inc' or 'Sam Altman'\n\
Output: Detailed Wikipedia article content";

pub const BROWSER_PREFIX: &str = "You are a helpful AI assistant with access to web search and Wikipedia. \
When asked about a CEO or founder, always use WebSearch to find current information. \
Read the search results carefully and extract the person's name from the results. \
For company names like 'Perplexity', try searching 'Perplexity AI CEO' or 'Perplexity company CEO'. \
Provide direct, concise answers based on the information you find.";

/// Which shell the agent is built for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotProfile {
    Cli,
    Browser,
}

impl BotProfile {
    /// Character budget of the encyclopedia tool
    pub const fn wikipedia_chars(self) -> usize {
        match self {
            Self::Cli => 500,
            Self::Browser => 1000,
        }
    }

    /// Loop configuration for `model`
    pub fn agent_config(self, model: impl Into<String>) -> AgentConfig {
        let (style, prefix, max_iterations, secs, temperature, max_tokens) = match self {
            Self::Cli => (PromptStyle::ZeroShot, None, 3, 20, 0.3, 256),
            Self::Browser => (
                PromptStyle::Conversational,
                Some(BROWSER_PREFIX.to_string()),
                5,
                40,
                0.5,
                512,
            ),
        };

        AgentConfig {
            prefix,
            style,
            max_iterations,
            max_execution_time: Some(Duration::from_secs(secs)),
            early_stopping: EarlyStopping::Generate,
            handle_parsing_errors: true,
            generation: GenerationOptions {
                model: model.into(),
                temperature,
                max_tokens,
                stop_sequences: Vec::new(),
            },
        }
    }

    /// Tools in the order they are presented to the model
    pub fn build_tools(
        self,
        search: Arc<dyn SearchBackend>,
        wiki: Arc<dyn EncyclopediaBackend>,
    ) -> ToolRegistry {
        let mut tools = ToolRegistry::new();
        match self {
            Self::Cli => {
                tools.register(WikipediaTool::new(
                    wiki,
                    "wikipedia",
                    CLI_WIKIPEDIA_DESCRIPTION,
                    self.wikipedia_chars(),
                ));
                tools.register(WebSearchTool::new(search, "duckduckgo_search", CLI_SEARCH_DESCRIPTION));
            }
            Self::Browser => {
                tools.register(WebSearchTool::new(search, "WebSearch", BROWSER_SEARCH_DESCRIPTION));
                tools.register(WikipediaTool::new(
                    wiki,
                    "Wikipedia",
                    BROWSER_WIKIPEDIA_DESCRIPTION,
                    self.wikipedia_chars(),
                ));
            }
        }
        tools
    }

    /// Assemble a ready agent
    pub fn agent(
        self,
        provider: Arc<dyn LlmProvider>,
        search: Arc<dyn SearchBackend>,
        wiki: Arc<dyn EncyclopediaBackend>,
        model: impl Into<String>,
    ) -> agent_core::Result<Agent> {
        let config = self.agent_config(model);
        config.generation.validate()?;
        Ok(Agent::new(provider, Arc::new(self.build_tools(search, wiki)), config))
    }
}
