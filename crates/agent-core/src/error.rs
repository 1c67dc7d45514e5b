//! Error Types

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// Completion provider returned an error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unreachable or timed out
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Tool not found in registry
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Completion output did not match the reasoning format
    #[error("Could not parse LLM output: {0}")]
    Parse(String),

    /// Iteration or time budget ran out with forced early stopping
    #[error("Agent stopped due to iteration limit or time limit ({iterations} iterations, {elapsed_secs}s)")]
    BudgetExhausted { iterations: usize, elapsed_secs: u64 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limited
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AgentError::ProviderUnavailable(_) | AgentError::RateLimited(_) | AgentError::Io(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Provider(msg) => format!("The AI service encountered an error: {msg}"),
            AgentError::ProviderUnavailable(_) => {
                "The AI service is currently unavailable. Please try again.".into()
            }
            AgentError::ToolNotFound(name) => format!("The tool '{name}' is not available."),
            AgentError::Parse(_) => {
                "I could not make sense of my own reasoning. Please try rephrasing your question."
                    .into()
            }
            AgentError::BudgetExhausted { .. } => {
                "I took too long to answer. Try rephrasing your question or making it more specific."
                    .into()
            }
            AgentError::Config(msg) => format!("The assistant is not configured: {msg}"),
            AgentError::RateLimited(_) => {
                "You've made too many requests. Please wait a moment.".into()
            }
            AgentError::Auth(_) => "Authentication failed. Please check your API key.".into(),
            _ => "An unexpected error occurred.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_message_mentions_limits() {
        let err = AgentError::BudgetExhausted {
            iterations: 3,
            elapsed_secs: 20,
        };
        let text = err.to_string().to_lowercase();
        assert!(text.contains("iteration limit"));
        assert!(text.contains("agent stopped"));
    }

    #[test]
    fn test_retryable() {
        assert!(AgentError::RateLimited("slow down".into()).is_retryable());
        assert!(!AgentError::Config("missing key".into()).is_retryable());
    }

    #[test]
    fn test_user_message() {
        let err = AgentError::BudgetExhausted {
            iterations: 5,
            elapsed_secs: 40,
        };
        assert!(err.user_message().starts_with("I took too long to answer"));
        assert_eq!(
            AgentError::Provider("script exhausted".into()).user_message(),
            "The AI service encountered an error: script exhausted"
        );
        assert_eq!(AgentError::Other("boom".into()).user_message(), "An unexpected error occurred.");
    }
}
