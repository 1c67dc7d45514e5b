//! API Client
//!
//! Thin wrappers over the agent-server JSON endpoints. reqwest in the
//! browser needs absolute URLs, so every path is joined to the page origin.

use serde::{Deserialize, Serialize};

/// Chat message for display
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    /// Error detail behind a failed turn
    #[serde(default)]
    pub debug: Option<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
            debug: None,
        }
    }

    pub fn assistant(content: impl Into<String>, debug: Option<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
            debug,
        }
    }
}

/// Session transcript
#[derive(Clone, Debug, Deserialize)]
pub struct SessionView {
    pub session_id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
}

/// Outcome of one turn
#[derive(Clone, Debug, Deserialize)]
pub struct ChatReply {
    pub session_id: String,
    pub message: String,
    pub failed: bool,
    #[serde(default)]
    pub debug: Option<String>,
}

fn url(path: &str) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into());
    format!("{origin}{path}")
}

async fn read<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T, String> {
    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        let data: serde_json::Value = response.json().await.unwrap_or_default();
        Err(data["error"].as_str().unwrap_or("Request failed").to_string())
    }
}

/// Start a new conversation
pub async fn create_session() -> Result<SessionView, String> {
    let response = reqwest::Client::new()
        .post(url("/api/sessions"))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read(response).await
}

/// Drop the conversation of a session
pub async fn clear_session(session_id: &str) -> Result<SessionView, String> {
    let response = reqwest::Client::new()
        .post(url(&format!("/api/sessions/{session_id}/clear")))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read(response).await
}

/// Send a chat message to the backend
pub async fn send_chat(session_id: &str, message: &str) -> Result<ChatReply, String> {
    let body = serde_json::json!({
        "session_id": session_id,
        "message": message,
    });

    let response = reqwest::Client::new()
        .post(url("/api/chat"))
        .json(&body)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read(response).await
}
