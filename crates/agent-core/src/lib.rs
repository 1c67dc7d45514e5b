//! # agent-core
//!
//! Core agent logic: provider-agnostic completion abstraction, lookup tools
//! and the ReAct turn loop.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           Agent                              │
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────────────┐ │
//! │  │  Reasoning  │   │    Tool     │   │    LlmProvider      │ │
//! │  │    Loop     │───│  Registry   │───│    (Strategy)       │ │
//! │  └──────┬──────┘   └─────────────┘   └─────────────────────┘ │
//! │         │ raw answer                                         │
//! │  ┌──────▼──────┐                                             │
//! │  │ clean_answer│──▶ Conversation (append-only)               │
//! │  └─────────────┘                                             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait lets the shells swap the hosted model without
//! touching the loop; the `Tool` trait does the same for lookup backends.

pub mod action;
pub mod error;
pub mod message;
pub mod postprocess;
pub mod prompt;
pub mod provider;
pub mod reasoning;
pub mod session;
pub mod tool;

pub use action::{Action, ParseError, PromptStyle};
pub use error::{AgentError, Result};
pub use message::{Conversation, Message, Role};
pub use postprocess::clean_answer;
pub use provider::{DEFAULT_MODEL, GenerationOptions, LlmProvider};
pub use reasoning::{Agent, AgentBuilder, AgentConfig, EarlyStopping};
pub use session::{Session, SessionId};
pub use tool::{Tool, ToolRegistry};
