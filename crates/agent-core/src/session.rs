//! Session Management
//!
//! A session owns the conversation for one user of a shell. It is passed by
//! `&mut` into the reasoning loop; nothing about it is process-global.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::{Conversation, Role};

/// Unique session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A conversation plus bookkeeping
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier
    pub id: SessionId,

    /// Conversation history
    pub conversation: Conversation,

    /// Model answering in this session
    pub model: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last activity timestamp
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session
    pub fn new(model: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            conversation: Conversation::new(),
            model: model.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the activity timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Title derived from the first user turn
    pub fn title(&self) -> String {
        self.conversation
            .messages()
            .iter()
            .find(|m| m.role == Role::User)
            .map_or_else(
                || format!("Session {}", self.id.0.chars().take(8).collect::<String>()),
                |m| {
                    let preview: String = m.content.chars().take(50).collect();
                    if m.content.chars().count() > 50 {
                        format!("{preview}...")
                    } else {
                        preview
                    }
                },
            )
    }

    /// Discard the whole conversation, keeping the identity
    pub fn clear(&mut self) {
        self.conversation.clear();
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_creation() {
        let session = Session::new("llama-3.1-8b-instant");
        assert_eq!(session.conversation.len(), 0);
        assert!(session.title().starts_with("Session "));
    }

    #[test]
    fn test_title_and_clear() {
        let mut session = Session::new("m");
        session
            .conversation
            .record_exchange("Who founded Tesla and when did the company go public on NASDAQ?", "2010.");
        assert_eq!(
            session.title(),
            "Who founded Tesla and when did the company go publ..."
        );

        let id = session.id.clone();
        session.clear();
        assert_eq!(session.conversation.len(), 0);
        assert_eq!(session.id, id);
    }
}
