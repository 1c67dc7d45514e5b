//! # knowledge-tools
//!
//! Lookup tools for the knowledge bot: DuckDuckGo web search and Wikipedia
//! summaries, plus the profiles that wire them into an agent for each shell.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  BotProfile::{Cli, Browser}                              │
//! │     │ agent_config()          │ build_tools()            │
//! │     ▼                         ▼                          │
//! │  AgentConfig          ┌───────────────┬──────────────┐   │
//! │                       │ WebSearchTool │ WikipediaTool│   │
//! │                       └──────┬────────┴──────┬───────┘   │
//! │                              ▼               ▼           │
//! │                       SearchBackend   EncyclopediaBackend│
//! │                       (DuckDuckGo)    (MediaWiki API)    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Tools never fail: backend errors come back to the model as text such as
//! `Search unavailable: ...` so it can try another tool or answer anyway.

pub mod error;
pub mod profile;
pub mod search;
pub mod svckit;
pub mod wiki;

pub use error::{Result, ToolsError};
pub use profile::BotProfile;
pub use search::{DuckDuckGoClient, MockSearchBackend, SearchBackend, SearchHit};
pub use wiki::{Article, EncyclopediaBackend, MockEncyclopedia, WikipediaClient};

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{WebSearchTool, WikipediaTool};
}
