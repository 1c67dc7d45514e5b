//! DuckDuckGo Search
//!
//! Queries the HTML endpoint (no API key) and scrapes the organic results.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};

use super::{SearchBackend, SearchHit};
use crate::error::{Result, ToolsError};

const ENDPOINT: &str = "https://html.duckduckgo.com/html/";
const USER_AGENT: &str = concat!("knowledge-bot/", env!("CARGO_PKG_VERSION"));

/// DuckDuckGo HTML search client
pub struct DuckDuckGoClient {
    client: reqwest::Client,
    endpoint: String,
}

impl DuckDuckGoClient {
    /// Default timeout for one search
    pub const TIMEOUT: Duration = Duration::from_secs(15);

    pub fn new() -> Result<Self> {
        Self::with_endpoint(ENDPOINT, Self::TIMEOUT)
    }

    /// Point at another endpoint (mirrors, local fixtures)
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SearchBackend for DuckDuckGoClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("q", query), ("b", "")])
            .send()
            .await?;

        match response.status() {
            // served instead of results when the caller is throttled
            StatusCode::ACCEPTED => {
                return Err(ToolsError::Backend("rate limited by DuckDuckGo".into()));
            }
            status if !status.is_success() => {
                return Err(ToolsError::Status {
                    status: status.as_u16(),
                });
            }
            _ => {}
        }

        let page = response.text().await?;
        let hits = parse_results(&page, max_results)?;
        tracing::debug!(query = %query, hits = hits.len(), "DuckDuckGo search");
        Ok(hits)
    }

    fn name(&self) -> &str {
        "DuckDuckGo"
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ToolsError::Parse(format!("selector `{css}`: {e}")))
}

fn collapse_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract organic results from a result page, skipping ads
pub(crate) fn parse_results(page: &str, max_results: usize) -> Result<Vec<SearchHit>> {
    let document = Html::parse_document(page);
    let result_sel = selector("div.result")?;
    let title_sel = selector("a.result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let mut hits = Vec::new();
    for result in document.select(&result_sel) {
        if hits.len() >= max_results {
            break;
        }
        if result.value().classes().any(|c| c == "result--ad") {
            continue;
        }
        let Some(link) = result.select(&title_sel).next() else {
            continue;
        };

        let title = collapse_text(link);
        let body = result
            .select(&snippet_sel)
            .next()
            .map(collapse_text)
            .unwrap_or_default();
        let url = link.value().attr("href").unwrap_or_default().to_string();

        hits.push(SearchHit { title, body, url });
    }

    Ok(hits)
}
