//! Mock Search Backend
//!
//! For testing and offline demos. Answers from canned hits keyed by a
//! substring of the query, or fails every call.

use async_trait::async_trait;

use super::{SearchBackend, SearchHit};
use crate::error::{Result, ToolsError};

/// Mock search backend with canned results
#[derive(Default)]
pub struct MockSearchBackend {
    entries: Vec<(String, Vec<SearchHit>)>,
    failure: Option<String>,
}

impl MockSearchBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend where every search fails with `detail`
    pub fn failing(detail: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            failure: Some(detail.into()),
        }
    }

    /// Answer queries containing `needle` (case-insensitive) with `hits`
    pub fn with_results(mut self, needle: impl Into<String>, hits: Vec<SearchHit>) -> Self {
        self.entries.push((needle.into().to_lowercase(), hits));
        self
    }
}

#[async_trait]
impl SearchBackend for MockSearchBackend {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        if let Some(detail) = &self.failure {
            return Err(ToolsError::Backend(detail.clone()));
        }

        let query = query.to_lowercase();
        Ok(self
            .entries
            .iter()
            .find(|(needle, _)| query.contains(needle.as_str()))
            .map(|(_, hits)| hits.iter().take(max_results).cloned().collect())
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "MockSearch"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_search() {
        let backend = MockSearchBackend::new().with_results(
            "tesla",
            vec![
                SearchHit::new("Tesla", "Founded 2003", "https://a"),
                SearchHit::new("Musk", "Joined 2004", "https://b"),
            ],
        );

        let hits = backend.search("Tesla founder", 1).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(backend.search("Python", 6).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failing_backend() {
        let backend = MockSearchBackend::failing("connection reset");
        let err = backend.search("anything", 6).await.unwrap_err();
        assert_eq!(err.to_string(), "connection reset");
    }
}
