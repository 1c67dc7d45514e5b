//! Error Types for Lookup Backends

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ToolsError>;

#[derive(Error, Debug)]
pub enum ToolsError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend returned HTTP {status}")]
    Status { status: u16 },

    #[error("{0}")]
    Backend(String),

    #[error("unexpected response: {0}")]
    Parse(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
