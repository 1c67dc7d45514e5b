//! HTTP Handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agent_core::{LlmProvider, Message, Session, SessionId};

use crate::state::{AppState, ChatSession, SharedSession};

/// Shown in place of an answer when the turn fails
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider_configured: bool,
    pub provider_connected: bool,
    pub tools: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub message: String,
    pub failed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub title: String,
    pub model: String,
    pub messages: Vec<Message>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id.to_string(),
            title: session.title(),
            model: session.model.clone(),
            messages: session.conversation.messages().to_vec(),
            updated_at: session.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

fn require_provider(state: &AppState) -> Result<Arc<dyn LlmProvider>, ApiError> {
    state.provider.clone().ok_or_else(|| {
        api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "CONFIG_ERROR",
            state
                .config_error
                .clone()
                .unwrap_or_else(|| "Assistant is not configured".into()),
        )
    })
}

async fn find_session(state: &AppState, id: &str) -> Result<SharedSession, ApiError> {
    state
        .session(&SessionId::from_string(id))
        .await
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", format!("No session {id}")))
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider_connected = match &state.provider {
        Some(provider) => provider.health_check().await.unwrap_or(false),
        None => false,
    };

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider_configured: state.provider.is_some(),
        provider_connected,
        tools: state.tools.names().into_iter().map(String::from).collect(),
    })
}

/// Start an empty conversation
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let provider = require_provider(&state)?;

    let shared = state.open_session(provider).await;
    let response = SessionResponse::from(&shared.lock().await.session);

    tracing::info!(session = %response.session_id, "Session created");
    Ok((StatusCode::CREATED, Json(response)))
}

/// Transcript of a session
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    require_provider(&state)?;
    let shared = find_session(&state, &id).await?;
    let chat = shared.lock().await;
    Ok(Json(SessionResponse::from(&chat.session)))
}

/// Drop the conversation of a session and start over with a fresh agent
pub async fn clear_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let provider = require_provider(&state)?;
    let shared = find_session(&state, &id).await?;
    let mut chat = shared.lock().await;
    chat.session.clear();
    chat.agent = state.build_agent(provider);

    tracing::info!(session = %id, "Session cleared");
    Ok(Json(SessionResponse::from(&chat.session)))
}

/// End a session and free it
pub async fn delete_session(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    require_provider(&state)?;
    if !state.remove_session(&SessionId::from_string(&id)).await {
        return Err(api_error(StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", format!("No session {id}")));
    }

    tracing::info!(session = %id, "Session deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Answer one message within a session
///
/// A failed turn is still a turn: the apology is recorded as the assistant
/// reply and the error detail is returned in `debug`.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let provider = require_provider(&state)?;

    let input = payload.message.trim();
    if input.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "EMPTY_MESSAGE", "Message is empty"));
    }

    let shared = match payload.session_id.as_deref() {
        Some(id) => find_session(&state, id).await?,
        None => state.open_session(provider).await,
    };

    // held across the turn so exchanges within a session never interleave
    let mut guard = shared.lock().await;
    let ChatSession { session, agent } = &mut *guard;
    let session_id = session.id.to_string();

    let response = match agent.chat(&mut session.conversation, input).await {
        Ok(answer) => ChatResponse {
            session_id,
            message: answer,
            failed: false,
            debug: None,
        },
        Err(e) => {
            tracing::error!(session = %session_id, retryable = e.is_retryable(), "Agent error: {}", e);
            session.conversation.record_exchange(input, APOLOGY);
            ChatResponse {
                session_id,
                message: APOLOGY.into(),
                failed: true,
                debug: Some(format!("{}\n\n{}", e.user_message(), e)),
            }
        }
    };
    session.touch();

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router;

    use axum::{
        body::{Body, to_bytes},
        http::Request,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use agent_core::ToolRegistry;
    use agent_runtime::ScriptedProvider;
    use knowledge_tools::{BotProfile, MockEncyclopedia, MockSearchBackend};

    fn tools() -> Arc<ToolRegistry> {
        Arc::new(BotProfile::Browser.build_tools(
            Arc::new(MockSearchBackend::new()),
            Arc::new(MockEncyclopedia::default()),
        ))
    }

    fn configured(script: &[&str]) -> AppState {
        let provider: Arc<dyn LlmProvider> = Arc::new(ScriptedProvider::new(script.iter().copied()));
        AppState::new(provider, tools(), BotProfile::Browser.agent_config("llama-3.1-8b-instant"))
    }

    fn unconfigured() -> AppState {
        AppState::unconfigured(
            "Please set GROQ_API_KEY in .env file",
            tools(),
            BotProfile::Browser.agent_config("llama-3.1-8b-instant"),
        )
    }

    async fn call(state: AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health_lists_tools() {
        let state = unconfigured();
        let (status, body) = call(state, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["provider_configured"], false);
        assert_eq!(body["provider_connected"], false);
        assert_eq!(body["tools"], json!(["WebSearch", "Wikipedia"]));
    }

    #[tokio::test]
    async fn test_unconfigured_refuses_sessions() {
        let state = unconfigured();

        let (status, body) = call(state.clone(), "POST", "/api/sessions", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "CONFIG_ERROR");

        let (status, _) = call(state, "POST", "/api/chat", Some(json!({"message": "hi"}))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_chat_records_exchanges() {
        let state = configured(&[
            "Thought: Do I need to use a tool? No\nAI: Sam Altman is the CEO of OpenAI.",
            "Thought: Do I need to use a tool? No\nAI: He attended Stanford University.",
        ]);

        let (status, created) = call(state.clone(), "POST", "/api/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["session_id"].as_str().unwrap().to_string();
        assert_eq!(created["messages"], json!([]));

        let (_, first) = call(
            state.clone(),
            "POST",
            "/api/chat",
            Some(json!({"session_id": id, "message": "Who is the CEO of OpenAI?"})),
        )
        .await;
        assert_eq!(first["message"], "Sam Altman is the CEO of OpenAI.");
        assert_eq!(first["failed"], false);
        assert!(first.get("debug").is_none());

        call(
            state.clone(),
            "POST",
            "/api/chat",
            Some(json!({"session_id": id, "message": "Where did he study?"})),
        )
        .await;

        let (_, transcript) = call(state, "GET", &format!("/api/sessions/{id}"), None).await;
        let messages = transcript["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[3]["content"], "He attended Stanford University.");
        assert_eq!(transcript["title"], "Who is the CEO of OpenAI?");
    }

    #[tokio::test]
    async fn test_failed_turn_records_apology() {
        // empty script: the provider errors on first use
        let state = configured(&[]);

        let (status, body) = call(
            state.clone(),
            "POST",
            "/api/chat",
            Some(json!({"message": "Who founded Tesla?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["failed"], true);
        assert_eq!(body["message"], APOLOGY);
        let debug = body["debug"].as_str().unwrap();
        assert!(debug.starts_with("The AI service encountered an error: script exhausted"));
        assert!(debug.ends_with("Provider error: script exhausted"));

        let id = body["session_id"].as_str().unwrap();
        let (_, transcript) = call(state, "GET", &format!("/api/sessions/{id}"), None).await;
        assert_eq!(transcript["messages"][1]["content"], APOLOGY);
    }

    #[tokio::test]
    async fn test_empty_message_and_unknown_session() {
        let state = configured(&[]);

        let (status, body) = call(state.clone(), "POST", "/api/chat", Some(json!({"message": "   "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "EMPTY_MESSAGE");

        let (status, body) = call(state.clone(), "GET", "/api/sessions/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "SESSION_NOT_FOUND");

        let (status, _) = call(state, "POST", "/api/sessions/nope/clear", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_clear_empties_transcript() {
        let state = configured(&[
            "AI: Python is a programming language created by Guido van Rossum.",
            "AI: Tesla was founded in 2003 by Martin Eberhard and Marc Tarpenning.",
        ]);
        let (_, created) = call(state.clone(), "POST", "/api/sessions", None).await;
        let id = created["session_id"].as_str().unwrap().to_string();

        call(
            state.clone(),
            "POST",
            "/api/chat",
            Some(json!({"session_id": id, "message": "Tell me about Python"})),
        )
        .await;

        let (status, cleared) = call(state.clone(), "POST", &format!("/api/sessions/{id}/clear"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cleared["messages"], json!([]));
        assert_eq!(cleared["session_id"], id.as_str());

        let (_, reply) = call(
            state.clone(),
            "POST",
            "/api/chat",
            Some(json!({"session_id": id, "message": "Who founded Tesla?"})),
        )
        .await;
        assert_eq!(reply["failed"], false);

        let (_, transcript) = call(state, "GET", &format!("/api/sessions/{id}"), None).await;
        assert_eq!(transcript["messages"].as_array().unwrap().len(), 2);
        assert_eq!(transcript["title"], "Who founded Tesla?");
    }

    #[tokio::test]
    async fn test_delete_session() {
        let state = configured(&[]);
        let (_, created) = call(state.clone(), "POST", "/api/sessions", None).await;
        let id = created["session_id"].as_str().unwrap().to_string();
        let uri = format!("/api/sessions/{id}");

        let (status, _) = call(state.clone(), "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.sessions.read().await.is_empty());

        let (status, _) = call(state.clone(), "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = call(state.clone(), "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "SESSION_NOT_FOUND");

        let (status, _) = call(unconfigured(), "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_sessionless_chats_do_not_accumulate() {
        let answers: Vec<String> = (0..50).map(|i| format!("AI: answer {i}")).collect();
        let answers: Vec<&str> = answers.iter().map(String::as_str).collect();
        let state = configured(&answers).with_idle_timeout(chrono::Duration::zero());

        for _ in 0..50 {
            let (status, body) = call(state.clone(), "POST", "/api/chat", Some(json!({"message": "hi"}))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["failed"], false);
        }
        assert_eq!(state.sessions.read().await.len(), 1);
    }
}
