//! Web Search Backends
//!
//! Abstractions and implementations for general web search.

mod duckduckgo;
mod mock;

pub use duckduckgo::DuckDuckGoClient;
pub use mock::MockSearchBackend;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One organic search result
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub body: String,
    pub url: String,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, body: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            url: url.into(),
        }
    }
}

/// Search backend trait (Strategy pattern)
///
/// Implement this for each search engine.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run a query, returning at most `max_results` hits in ranking order
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>>;

    /// Backend name
    fn name(&self) -> &str;
}
