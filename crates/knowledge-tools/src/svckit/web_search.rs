//! Web Search Tool
//!
//! Runs a query against a search backend and renders the top hits as
//! numbered text blocks for the model to read.

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::Tool;

use crate::search::{SearchBackend, SearchHit};

/// Hits requested from the backend
const FETCH_RESULTS: usize = 6;
/// Hits shown to the model
const SHOWN_RESULTS: usize = 4;
/// Per-hit body budget, in characters
const BODY_CHARS: usize = 350;

pub const NO_RESULTS: &str = "No search results found.";

/// Tool for general web search
pub struct WebSearchTool {
    backend: Arc<dyn SearchBackend>,
    name: String,
    description: String,
}

impl WebSearchTool {
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            name: name.into(),
            description: description.into(),
        }
    }
}

fn render(hits: &[SearchHit]) -> String {
    hits.iter()
        .take(SHOWN_RESULTS)
        .enumerate()
        .map(|(i, hit)| {
            let body: String = hit.body.chars().take(BODY_CHARS).collect();
            format!("Result {}: {}\n{}", i + 1, hit.title, body.trim())
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn invoke(&self, query: &str) -> String {
        match self.backend.search(query, FETCH_RESULTS).await {
            Ok(hits) if hits.is_empty() => NO_RESULTS.to_string(),
            Ok(hits) => render(&hits),
            Err(e) => {
                tracing::warn!(backend = self.backend.name(), "Web search failed: {}", e);
                format!("Search unavailable: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::MockSearchBackend;

    fn tool(backend: MockSearchBackend) -> WebSearchTool {
        WebSearchTool::new(Arc::new(backend), "WebSearch", "Searches the web.")
    }

    #[tokio::test]
    async fn test_formats_top_four() {
        let hits = (1..=6)
            .map(|i| SearchHit::new(format!("Title {i}"), format!("  body {i}  "), "https://x"))
            .collect();
        let tool = tool(MockSearchBackend::new().with_results("openai", hits));

        let out = tool.invoke("OpenAI CEO").await;
        assert!(out.starts_with("Result 1: Title 1\nbody 1\n\nResult 2: Title 2\nbody 2"));
        assert!(out.contains("Result 4: Title 4"));
        assert!(!out.contains("Result 5"));
    }

    #[tokio::test]
    async fn test_truncates_bodies() {
        let long = format!("{}   tail", "a".repeat(348));
        let hits = vec![SearchHit::new("Long", long, "https://x")];
        let tool = tool(MockSearchBackend::new().with_results("long", hits));

        let out = tool.invoke("long").await;
        // 348 chars plus two spaces, trimmed
        assert_eq!(out, format!("Result 1: Long\n{}", "a".repeat(348)));
    }

    #[tokio::test]
    async fn test_empty_and_failure() {
        assert_eq!(tool(MockSearchBackend::new()).invoke("nothing").await, NO_RESULTS);

        let out = tool(MockSearchBackend::failing("timed out")).invoke("x").await;
        assert_eq!(out, "Search unavailable: timed out");
    }
}
