//! Mock Encyclopedia
//!
//! Canned articles for tests and offline demos.

use async_trait::async_trait;

use super::{Article, EncyclopediaBackend};
use crate::error::{Result, ToolsError};

/// Mock encyclopedia with a fixed article set
#[derive(Default)]
pub struct MockEncyclopedia {
    articles: Vec<Article>,
    failure: Option<String>,
}

impl MockEncyclopedia {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles,
            failure: None,
        }
    }

    /// Encyclopedia where every lookup fails with `detail`
    pub fn failing(detail: impl Into<String>) -> Self {
        Self {
            articles: Vec::new(),
            failure: Some(detail.into()),
        }
    }
}

#[async_trait]
impl EncyclopediaBackend for MockEncyclopedia {
    async fn lookup(&self, query: &str, max_results: usize) -> Result<Vec<Article>> {
        if let Some(detail) = &self.failure {
            return Err(ToolsError::Backend(detail.clone()));
        }

        let words: Vec<String> = query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        Ok(self
            .articles
            .iter()
            .filter(|a| {
                let haystack = format!("{} {}", a.title, a.summary).to_lowercase();
                words.iter().any(|w| haystack.contains(w.as_str()))
            })
            .take(max_results)
            .cloned()
            .collect())
    }

    fn name(&self) -> &str {
        "MockEncyclopedia"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_lookup() {
        let wiki = MockEncyclopedia::new(vec![
            Article::new("Python (programming language)", "A language by Guido van Rossum."),
            Article::new("Monty Python", "A British comedy troupe."),
            Article::new("Rust (programming language)", "A systems language."),
        ]);

        let found = wiki.lookup("python", 2).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(wiki.lookup("haskell", 2).await.unwrap().is_empty());
        assert!(MockEncyclopedia::failing("503").lookup("x", 2).await.is_err());
    }
}
