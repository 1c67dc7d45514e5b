//! Wikipedia Client
//!
//! Uses the MediaWiki action API: a full-text search for titles, then the
//! plain-text intro of each page.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{Article, EncyclopediaBackend};
use crate::error::{Result, ToolsError};

const API_URL: &str = "https://en.wikipedia.org/w/api.php";
const USER_AGENT: &str = concat!(
    "knowledge-bot/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/your-org/knowledge-bot)"
);

/// Longer queries are cut before searching
const MAX_QUERY_CHARS: usize = 300;

/// MediaWiki API client
pub struct WikipediaClient {
    client: reqwest::Client,
    api_url: String,
}

impl WikipediaClient {
    pub const TIMEOUT: Duration = Duration::from_secs(15);

    /// English Wikipedia
    pub fn new() -> Result<Self> {
        Self::with_api_url(API_URL, Self::TIMEOUT)
    }

    /// Another MediaWiki installation or language edition
    pub fn with_api_url(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, params: &[(&str, &str)]) -> Result<T> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolsError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn search_titles(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let limit = limit.to_string();
        let response: SearchResponse = self
            .get(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", &limit),
            ])
            .await?;

        if let Some(error) = response.error {
            return Err(ToolsError::Backend(error.info));
        }
        Ok(response
            .query
            .map(|q| q.search.into_iter().map(|s| s.title).collect())
            .unwrap_or_default())
    }

    async fn intro(&self, title: &str) -> Result<Option<Article>> {
        let response: ExtractResponse = self
            .get(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", title),
            ])
            .await?;

        Ok(response
            .query
            .and_then(|q| q.pages.into_iter().next())
            .filter(|page| !page.missing)
            .and_then(|page| {
                let summary = page.extract.unwrap_or_default();
                (!summary.trim().is_empty()).then(|| Article::new(page.title, summary.trim()))
            }))
    }
}

#[async_trait]
impl EncyclopediaBackend for WikipediaClient {
    async fn lookup(&self, query: &str, max_results: usize) -> Result<Vec<Article>> {
        let query: String = query.chars().take(MAX_QUERY_CHARS).collect();
        let titles = self.search_titles(&query, max_results).await?;

        let mut articles = Vec::with_capacity(titles.len());
        for title in titles {
            match self.intro(&title).await {
                Ok(Some(article)) => articles.push(article),
                Ok(None) => {}
                Err(e) => tracing::warn!(title = %title, "Skipping Wikipedia page: {}", e),
            }
        }

        tracing::debug!(query = %query, articles = articles.len(), "Wikipedia lookup");
        Ok(articles)
    }

    fn name(&self) -> &str {
        "Wikipedia"
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ApiError {
    info: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchEntry>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    #[serde(default)]
    query: Option<ExtractQuery>,
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    missing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_shape() {
        let body = r#"{"batchcomplete": true, "query": {"searchinfo": {"totalhits": 2},
            "search": [{"ns": 0, "title": "Sam Altman", "pageid": 1}, {"ns": 0, "title": "OpenAI", "pageid": 2}]}}"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        let titles: Vec<String> = parsed.query.unwrap().search.into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Sam Altman", "OpenAI"]);

        let failed: SearchResponse =
            serde_json::from_str(r#"{"error": {"code": "nosrsearch", "info": "The \"srsearch\" parameter must be set."}}"#)
                .unwrap();
        assert!(failed.error.is_some());
    }

    #[test]
    fn test_extract_response_shape() {
        let body = r#"{"query": {"pages": [{"pageid": 7, "title": "Python (programming language)",
            "extract": "Python is a high-level, general-purpose programming language."}]}}"#;
        let parsed: ExtractResponse = serde_json::from_str(body).unwrap();
        let page = parsed.query.unwrap().pages.remove(0);
        assert!(!page.missing);
        assert!(page.extract.unwrap().starts_with("Python is"));

        let missing: ExtractResponse =
            serde_json::from_str(r#"{"query": {"pages": [{"title": "Nope", "missing": true}]}}"#).unwrap();
        assert!(missing.query.unwrap().pages[0].missing);
    }
}
