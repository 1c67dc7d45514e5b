//! Conversation Messages
//!
//! Turns exchanged between the user and the assistant, and the ordered log
//! that holds them for the lifetime of a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a message sender
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Prompt instructions sent to the completion provider
    System,
    /// User input
    User,
    /// Assistant (LLM) response
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single message. Stored in a [`Conversation`] it is one turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message role
    pub role: Role,

    /// Text content
    pub content: String,

    /// Timestamp
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new message
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Append-only conversation log.
///
/// Turns can be added but never reordered or removed individually; the only
/// way to drop history is [`Conversation::clear`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Append one user turn followed by one assistant turn
    pub fn record_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.push(Message::user(user));
        self.push(Message::assistant(assistant));
    }

    /// Get all messages
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Get the last message
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Drop every turn
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Render the history as `Human:` / `AI:` lines for prompt injection
    pub fn render_history(&self) -> String {
        self.messages
            .iter()
            .filter_map(|m| match m.role {
                Role::User => Some(format!("Human: {}", m.content)),
                Role::Assistant => Some(format!("AI: {}", m.content)),
                Role::System => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
    }

    #[test]
    fn test_exchanges_keep_order() {
        let mut conv = Conversation::new();
        conv.record_exchange("Who is the CEO of OpenAI?", "Sam Altman.");
        conv.record_exchange("Where did he study?", "Stanford, briefly.");

        assert_eq!(conv.len(), 4);
        let roles: Vec<Role> = conv.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        assert_eq!(conv.messages()[2].content, "Where did he study?");
        assert_eq!(conv.last().unwrap().content, "Stanford, briefly.");
    }

    #[test]
    fn test_render_history() {
        let mut conv = Conversation::new();
        conv.record_exchange("Hi", "Hello!");
        assert_eq!(conv.render_history(), "Human: Hi\nAI: Hello!");

        conv.clear();
        assert!(conv.is_empty());
        assert_eq!(conv.render_history(), "");
    }
}
