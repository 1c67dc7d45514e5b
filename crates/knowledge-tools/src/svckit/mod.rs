//! Service Kit - Agent Tools
//!
//! Lookup tools that implement `agent_core::Tool` over the search and
//! encyclopedia backends.

mod web_search;
mod wikipedia;

pub use web_search::WebSearchTool;
pub use wikipedia::WikipediaTool;
