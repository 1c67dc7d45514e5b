//! Encyclopedia Backends

mod mock;
mod wikipedia;

pub use mock::MockEncyclopedia;
pub use wikipedia::WikipediaClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Introductory excerpt of one article
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub summary: String,
}

impl Article {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
        }
    }
}

/// Encyclopedia backend trait
#[async_trait]
pub trait EncyclopediaBackend: Send + Sync {
    /// Find up to `max_results` articles for a topic, best match first
    async fn lookup(&self, query: &str, max_results: usize) -> Result<Vec<Article>>;

    /// Backend name
    fn name(&self) -> &str;
}
