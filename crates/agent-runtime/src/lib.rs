//! # agent-runtime
//!
//! Completion providers for the knowledge-bot shells.
//!
//! ## Providers
//!
//! - **Groq** (default): hosted inference over Groq's OpenAI-compatible API
//! - **Scripted**: canned completions for tests and offline runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::GroqProvider;
//!
//! let provider = GroqProvider::from_env()?;
//! let agent = AgentBuilder::new()
//!     .provider(Arc::new(provider))
//!     .build()?;
//! ```

pub mod groq;
pub mod scripted;

pub use groq::{GroqConfig, GroqProvider};
pub use scripted::ScriptedProvider;

// Re-export core types for convenience
pub use agent_core::{
    Agent, AgentError, Conversation, LlmProvider, Message, Result, Role, Session, Tool,
    ToolRegistry,
};
