//! Wikipedia Tool
//!
//! Looks a topic up in an encyclopedia backend and returns the intros of the
//! best matching articles, capped to a character budget.

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::Tool;

use crate::wiki::{Article, EncyclopediaBackend};

/// Articles shown to the model
const TOP_ARTICLES: usize = 2;

pub const NO_ARTICLES: &str = "No good Wikipedia Search Result was found";

/// Tool for encyclopedia lookups
pub struct WikipediaTool {
    backend: Arc<dyn EncyclopediaBackend>,
    name: String,
    description: String,
    max_chars: usize,
}

impl WikipediaTool {
    pub fn new(
        backend: Arc<dyn EncyclopediaBackend>,
        name: impl Into<String>,
        description: impl Into<String>,
        max_chars: usize,
    ) -> Self {
        Self {
            backend,
            name: name.into(),
            description: description.into(),
            max_chars,
        }
    }

    fn render(&self, articles: &[Article]) -> String {
        articles
            .iter()
            .take(TOP_ARTICLES)
            .map(|a| format!("Page: {}\nSummary: {}", a.title, a.summary))
            .collect::<Vec<_>>()
            .join("\n\n")
            .chars()
            .take(self.max_chars)
            .collect()
    }
}

#[async_trait]
impl Tool for WikipediaTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn invoke(&self, query: &str) -> String {
        match self.backend.lookup(query, TOP_ARTICLES).await {
            Ok(articles) if articles.is_empty() => NO_ARTICLES.to_string(),
            Ok(articles) => self.render(&articles),
            Err(e) => {
                tracing::warn!(backend = self.backend.name(), "Wikipedia lookup failed: {}", e);
                format!("Wikipedia error: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiki::MockEncyclopedia;

    fn articles() -> Vec<Article> {
        vec![
            Article::new("Python (programming language)", "Python is a programming language."),
            Article::new("Python (genus)", "Python is a genus of snakes."),
            Article::new("Monty Python", "Python comedy."),
        ]
    }

    #[tokio::test]
    async fn test_formats_top_two() {
        let tool = WikipediaTool::new(Arc::new(MockEncyclopedia::new(articles())), "Wikipedia", "", 1000);

        let out = tool.invoke("Python").await;
        assert_eq!(
            out,
            "Page: Python (programming language)\nSummary: Python is a programming language.\n\n\
             Page: Python (genus)\nSummary: Python is a genus of snakes."
        );
    }

    #[tokio::test]
    async fn test_caps_total_length() {
        let tool = WikipediaTool::new(Arc::new(MockEncyclopedia::new(articles())), "wikipedia", "", 40);

        let out = tool.invoke("Python").await;
        assert_eq!(out.chars().count(), 40);
        assert!(out.starts_with("Page: Python (programming language)"));
    }

    #[tokio::test]
    async fn test_empty_and_failure() {
        let tool = WikipediaTool::new(Arc::new(MockEncyclopedia::new(articles())), "Wikipedia", "", 500);
        assert_eq!(tool.invoke("Haskell").await, NO_ARTICLES);

        let tool = WikipediaTool::new(Arc::new(MockEncyclopedia::failing("HTTP 503")), "Wikipedia", "", 500);
        assert_eq!(tool.invoke("Python").await, "Wikipedia error: HTTP 503");
    }
}
